//! End-to-end tests for the command-line front end
//!
//! Tests are organized by topic:
//! - `single_run` - Human, JSON and CSV output of one valuation
//! - `monte_carlo` - Sample reporting, `data.out` and benchmark lines


use std::path::Path;

use crate::app::{RunOptions, run};
use crate::cli::Args;
use crate::config_file::RunConfigFile;
use clap::Parser;

/// Resolve `args` and point `data.out` into `dir`
fn options_in(dir: &Path, args: &[&str]) -> RunOptions {
    let args = Args::try_parse_from(std::iter::once("iraplan").chain(args.iter().copied())).unwrap();
    let mut options = args.resolve(RunConfigFile::default()).unwrap();
    options.data_out = dir.join("data.out");
    options
}

fn run_to_string(options: &RunOptions) -> String {
    let mut out = Vec::new();
    run(options, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}
