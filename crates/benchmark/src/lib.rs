//! Scenario comparison suite for sheetcut
//!
//! This crate provides:
//! - JSON scenario files: a cut list plus named settings variants
//! - A runner that lays out every variant with its own optimizer
//! - Result tables with JSON and CSV export

mod result;
mod runner;
mod scenario;

pub use result::{ComparisonReport, ComparisonRow};
pub use runner::{RunnerConfig, ScenarioRunner};
pub use scenario::{sweep, Scenario, ScenarioError, Variant};
