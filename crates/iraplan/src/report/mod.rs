//! Result reporters for stdout: human-readable lines, JSON and benchmark lines

mod benchmark;
mod human;
mod json;

pub use benchmark::{write_benchmark_line, write_timing_line};
pub use human::write_human;
pub use json::{JsonReport, JsonVariable, write_json};

use iraplan_core::model::{InputSeries, MonteCarloResult, OutputKind, SimulationResult};

/// What a run produced, borrowed for reporting
#[derive(Debug, Clone, Copy)]
pub enum RunOutcome<'a> {
    Single(&'a SimulationResult),
    MonteCarlo(&'a MonteCarloResult),
}

impl RunOutcome<'_> {
    /// Inputs of the run, or of the final iteration in Monte Carlo mode
    pub fn inputs(&self) -> &InputSeries {
        match self {
            RunOutcome::Single(result) => &result.inputs,
            RunOutcome::MonteCarlo(result) => &result.last_inputs,
        }
    }

    /// Reported values per output kind: one value for a single run, every
    /// sample in Monte Carlo mode
    pub fn output_values(&self) -> Vec<(OutputKind, Vec<f64>)> {
        match self {
            RunOutcome::Single(result) => result
                .outputs
                .iter()
                .map(|(kind, value)| (kind, vec![value]))
                .collect(),
            RunOutcome::MonteCarlo(result) => vec![(result.output, result.samples.clone())],
        }
    }

    /// The single scalar a benchmark harness compares: the selected output,
    /// or the Monte Carlo mean
    pub fn benchmark_value(&self) -> Option<f64> {
        match self {
            RunOutcome::Single(result) => result.outputs.iter().next().map(|(_, value)| value),
            RunOutcome::MonteCarlo(result) => Some(result.stats.mean),
        }
    }
}
