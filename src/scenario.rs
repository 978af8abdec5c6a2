use serde_json::Value;
use std::fmt;
use std::io::{self, Write};

use crate::data::Site;
use crate::error::ScenarioError;
use crate::grid::PercolationGrid;

/// A scripted sequence of openings, each followed by optional expectations.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub n: isize,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub open: Site,
    pub open_sites: Option<usize>,
    pub full: Option<(Site, bool)>,
    pub percolates: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub step: usize,
    pub label: String,
    pub expected: String,
    pub actual: String,
}

impl Check {
    fn new<T: fmt::Display + PartialEq>(step: usize, label: String, expected: T, actual: T) -> Check {
        Check { step, label, expected: expected.to_string(), actual: actual.to_string() }
    }

    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.passed() {
            write!(f, "(expected) {}: {}", self.label, self.actual)
        } else {
            write!(f, "(error) {}: {}, expected {}", self.label, self.actual, self.expected)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub checks: Vec<Check>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(Check::passed)
    }

    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed()).count()
    }

    /// Writes each check under the opening it followed.
    pub fn write_out<W: Write>(&self, scenario: &Scenario, out: &mut W) -> io::Result<()> {
        let mut step = 0;
        for check in &self.checks {
            if check.step != step {
                step = check.step;
                if let Some(s) = scenario.steps.get(step - 1) {
                    writeln!(out, "open site Row {} Col {}", s.open.row, s.open.col)?;
                }
            }
            writeln!(out, "{}", check)?;
        }
        out.flush()
    }
}

fn bad_field(field: &str) -> ScenarioError {
    ScenarioError::BadField { field: field.to_string() }
}

fn parse_coord(v: &Value, field: &str) -> Result<isize, ScenarioError> {
    v.as_i64().map(|x| x as isize).ok_or_else(|| bad_field(field))
}

fn parse_site(v: &Value, field: &str) -> Result<Site, ScenarioError> {
    match v.as_array() {
        Some(pair) if pair.len() == 2 => {
            Ok(Site::new(parse_coord(&pair[0], field)?, parse_coord(&pair[1], field)?))
        }
        _ => Err(bad_field(field)),
    }
}

// null and absent both mean "no expectation"
fn optional<'a>(v: &'a Value, key: &str) -> Option<&'a Value> {
    v.get(key).filter(|x| !x.is_null())
}

impl Step {
    fn from_value(v: &Value) -> Result<Step, ScenarioError> {
        let open = parse_site(v.get("open").ok_or_else(|| bad_field("open"))?, "open")?;

        let open_sites = match optional(v, "open_sites") {
            Some(x) => Some(x.as_u64().ok_or_else(|| bad_field("open_sites"))? as usize),
            None => None,
        };

        let full = match optional(v, "full") {
            Some(x) => {
                let row = parse_coord(x.get("row").unwrap_or(&Value::Null), "full.row")?;
                let col = parse_coord(x.get("col").unwrap_or(&Value::Null), "full.col")?;
                let expect = x["expect"].as_bool().ok_or_else(|| bad_field("full.expect"))?;
                Some((Site::new(row, col), expect))
            }
            None => None,
        };

        let percolates = match optional(v, "percolates") {
            Some(x) => Some(x.as_bool().ok_or_else(|| bad_field("percolates"))?),
            None => None,
        };

        Ok(Step { open, open_sites, full, percolates })
    }
}

impl Scenario {
    /// The 4x4 walk-through: a column grows down from (1, 2) until it meets
    /// the bottom row.
    pub fn builtin() -> Scenario {
        let step = |row, col, open_sites, full: (isize, isize, bool), percolates| Step {
            open: Site::new(row, col),
            open_sites: Some(open_sites),
            full: Some((Site::new(full.0, full.1), full.2)),
            percolates,
        };
        Scenario {
            n: 4,
            steps: vec![
                step(2, 2, 1, (2, 2, false), None),
                step(1, 2, 2, (2, 2, true), None),
                step(4, 3, 3, (4, 3, false), None),
                step(3, 2, 4, (3, 2, true), None),
                step(4, 2, 5, (4, 2, true), Some(true)),
            ],
        }
    }

    pub fn from_json(s: &str) -> Result<Scenario, ScenarioError> {
        let v: Value = serde_json::from_str(s)?;
        Scenario::from_value(&v)
    }

    pub fn from_value(v: &Value) -> Result<Scenario, ScenarioError> {
        let n = v["n"].as_i64().ok_or_else(|| bad_field("n"))? as isize;
        let steps = v["steps"].as_array().ok_or_else(|| bad_field("steps"))?
            .iter()
            .map(Step::from_value)
            .collect::<Result<Vec<Step>, ScenarioError>>()?;
        Ok(Scenario { n, steps })
    }

    /// Replays every step on a fresh grid. Steps are numbered from 1; a grid
    /// that cannot be built is reported as step 0.
    pub fn run(&self) -> Result<Report, ScenarioError> {
        let mut grid = PercolationGrid::new(self.n)
            .map_err(|source| ScenarioError::Grid { step: 0, source })?;
        let mut checks = Vec::new();

        for (k, step) in self.steps.iter().enumerate() {
            let k = k + 1;
            let grid_err = |source| ScenarioError::Grid { step: k, source };
            info!("open site Row {} Col {}", step.open.row, step.open.col);
            grid.open_site(step.open).map_err(grid_err)?;

            if let Some(expected) = step.open_sites {
                checks.push(Check::new(k, "Opened Sites".to_string(),
                    expected, grid.number_of_open_sites()));
            }
            if let Some((site, expected)) = step.full {
                let actual = grid.is_full_site(site).map_err(grid_err)?;
                checks.push(Check::new(k, format!("Row {} Col {} is full site", site.row, site.col),
                    expected, actual));
            }
            if let Some(expected) = step.percolates {
                checks.push(Check::new(k, "does system percolate".to_string(),
                    expected, grid.percolates()));
            }
        }

        let report = Report { checks };
        if !report.passed() {
            warn!("{} of {} checks failed", report.failures(), report.checks.len());
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn test_builtin_passes() {
        let report = Scenario::builtin().run().unwrap();
        assert_eq!(report.checks.len(), 11);
        assert!(report.passed());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_out() {
        let scenario = Scenario::builtin();
        let report = scenario.run().unwrap();
        let mut out = Vec::new();
        report.write_out(&scenario, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "open site Row 2 Col 2");
        assert_eq!(lines[1], "(expected) Opened Sites: 1");
        assert_eq!(lines[2], "(expected) Row 2 Col 2 is full site: false");
        assert_eq!(lines[15], "(expected) does system percolate: true");
    }

    #[test]
    fn test_write_out_reports_write_errors() {
        let scenario = Scenario::builtin();
        let report = scenario.run().unwrap();
        let err = report.write_out(&scenario, &mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_parse() {
        let s = Scenario::from_json(r#"{
            "n": 3,
            "steps": [
                {"open": [1, 1], "open_sites": 1, "full": {"row": 1, "col": 1, "expect": true}},
                {"open": [2, 1], "percolates": null},
                {"open": [3, 1], "percolates": true}
            ]
        }"#).unwrap();
        assert_eq!(s.n, 3);
        assert_eq!(s.steps.len(), 3);
        assert_eq!(s.steps[0].full, Some((Site::new(1, 1), true)));
        assert_eq!(s.steps[1].percolates, None);
        assert_eq!(s.steps[2].open, Site::new(3, 1));
        assert!(s.run().unwrap().passed());
    }

    #[test]
    fn test_mismatch_is_reported() {
        let s = Scenario::from_json(r#"{"n": 2, "steps": [{"open": [1, 1], "percolates": true}]}"#).unwrap();
        let report = s.run().unwrap();
        assert!(!report.passed());
        assert_eq!(report.failures(), 1);
        assert_eq!(report.checks[0].to_string(), "(error) does system percolate: false, expected true");
    }

    #[test]
    fn test_bad_fields() {
        match Scenario::from_json(r#"{"steps": []}"#) {
            Err(ScenarioError::BadField { field }) => assert_eq!(field, "n"),
            other => panic!("unexpected {:?}", other),
        }
        match Scenario::from_json(r#"{"n": 2, "steps": [{"open": [1]}]}"#) {
            Err(ScenarioError::BadField { field }) => assert_eq!(field, "open"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(Scenario::from_json("{"), Err(ScenarioError::Json(_))));
    }

    #[test]
    fn test_grid_errors_carry_step() {
        let s = Scenario::from_json(r#"{"n": 2, "steps": [{"open": [1, 1]}, {"open": [0, 1]}]}"#).unwrap();
        match s.run() {
            Err(ScenarioError::Grid { step, source }) => {
                assert_eq!(step, 2);
                assert_eq!(source, GridError::Coordinate { row: 0, col: 1, n: 2 });
            }
            other => panic!("unexpected {:?}", other),
        }

        let s = Scenario { n: 0, steps: Vec::new() };
        assert!(matches!(s.run(), Err(ScenarioError::Grid { step: 0, .. })));
    }
}
