#[macro_use] extern crate log;
extern crate simplelog;
extern crate pico_args;
extern crate percolation;

use simplelog::*;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::process;

use percolation::Scenario;

const HELP: &str = r"
Usage: percolation [scenario.json] [OPTION]+

Runs the built-in 4x4 scenario when no scenario file is given.

Valid boolean options are:
--verbose

Valid options with arguments are:
--log-file (output.log)";

#[derive(Debug)]
struct Opts {
	scenario: Option<PathBuf>,
	log_file: Option<PathBuf>,
	verbose: bool,
}

fn parse_path(s: &std::ffi::OsStr) -> Result<PathBuf, &'static str> {
	Ok(s.into())
}

fn parse_args() -> Result<Opts, pico_args::Error> {
	let mut pargs = pico_args::Arguments::from_env();

	if pargs.contains("--help") {
		println!("{}", HELP);
		process::exit(0);
	}

	Ok(Opts {
		verbose: pargs.contains("--verbose"),
		log_file: pargs.opt_value_from_os_str("--log-file", parse_path)?,
		scenario: pargs.opt_free_from_os_str(parse_path)?,
	})
}

fn config() -> Config {
	Config {time: None, level: None, target: None, location: None, time_format: None}
}

fn init_logging(opts: &Opts) -> io::Result<()> {
	let level = if opts.verbose { LevelFilter::Debug } else { LevelFilter::Info };
	let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
	loggers.push(WriteLogger::new(level, config(), io::stderr()));
	if let Some(path) = &opts.log_file {
		loggers.push(WriteLogger::new(LevelFilter::Trace, config(), File::create(path)?));
	}
	// only fails if a logger is already installed
	let _ = CombinedLogger::init(loggers);
	Ok(())
}

fn load(opts: &Opts) -> Result<Scenario, String> {
	match &opts.scenario {
		Some(path) => {
			let text = fs::read_to_string(path)
				.map_err(|e| format!("could not read {}: {}", path.display(), e))?;
			Scenario::from_json(&text).map_err(|e| e.to_string())
		}
		None => Ok(Scenario::builtin()),
	}
}

fn main() {
	let opts = match parse_args() {
		Ok(v) => v,
		Err(e) => {
			eprintln!("We didn't understand the arguments you provided: {}", e);
			println!("{}", HELP);
			process::exit(1);
		}
	};

	if let Err(e) = init_logging(&opts) {
		eprintln!("Error: could not open log file: {}", e);
		process::exit(1);
	}

	let scenario = match load(&opts) {
		Ok(s) => s,
		Err(e) => {
			eprintln!("Error: {}", e);
			process::exit(1);
		}
	};
	info!("running {}x{} scenario with {} steps", scenario.n, scenario.n, scenario.steps.len());

	let report = match scenario.run() {
		Ok(r) => r,
		Err(e) => {
			eprintln!("Error: {}", e);
			process::exit(1);
		}
	};

	let stdout = io::stdout();
	if let Err(e) = report.write_out(&scenario, &mut stdout.lock()) {
		eprintln!("Error: could not write report: {}", e);
		process::exit(1);
	}

	if !report.passed() {
		process::exit(2);
	}
}
