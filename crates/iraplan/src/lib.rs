//! Command-line front end for the retirement account valuation engine
//!
//! Parses flags (optionally layered over a YAML run file), reads yearly
//! inputs from CSV, runs a single valuation or a Monte Carlo study via
//! `iraplan_core`, and reports results as text, JSON or benchmark lines.

pub mod app;
pub mod cli;
pub mod config_file;
pub mod io;
pub mod logging;
pub mod report;

#[cfg(test)]
mod tests;

pub use app::{RunOptions, run};
pub use cli::Args;
pub use config_file::RunConfigFile;
pub use logging::init_logging;
