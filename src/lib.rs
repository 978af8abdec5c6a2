#[macro_use] extern crate log;
extern crate serde_json;
extern crate thiserror;

mod data;
mod disjoint_set;
mod error;
mod grid;
mod scenario;

pub use data::{Site, SiteState, Direction};
pub use disjoint_set::DisjointSet;
pub use error::{DisjointSetError, GridError, ScenarioError};
pub use grid::PercolationGrid;
pub use scenario::{Scenario, Step, Check, Report};
