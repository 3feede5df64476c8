//! Simulation results
//!
//! Output types produced by single runs and Monte Carlo runs.

use serde::{Deserialize, Serialize};

use super::outputs::{OutputDistributions, OutputKind};
use super::series::InputSeries;

/// Result of one deterministic (or single sampled) run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// The series the kernel was evaluated on
    pub inputs: InputSeries,
    pub outputs: OutputDistributions,
}

/// Mean and population variance of a sample set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeanAndVariance {
    pub mean: f64,
    pub variance: f64,
}

impl MeanAndVariance {
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Results from a Monte Carlo run (one sample per iteration)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub output: OutputKind,
    /// Samples in iteration order
    pub samples: Vec<f64>,
    pub stats: MeanAndVariance,
    /// Inputs drawn for the last iteration, kept for reporting
    pub last_inputs: InputSeries,
}

impl MonteCarloResult {
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.samples.len()
    }
}
