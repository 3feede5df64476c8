//! Retirement account valuation under uncertain yearly inputs
//!
//! This crate models the future value of a tax-advantaged retirement account
//! whose yearly contribution, interest rate, tax rate and withdrawal rate are
//! uncertain. It supports:
//! - Per-year sampling of inputs from uniform distributions or fixed overrides
//! - Two valuation recurrences (taxed interest, taxed withdrawal)
//! - Single deterministic runs and Monte Carlo runs, sequential or parallel
//! - Mean and population variance of Monte Carlo samples
//!
//! ```ignore
//! use iraplan_core::config::{InputSource, RunMode, SimulationConfig};
//! use iraplan_core::model::{OutputKind, OutputSelect};
//! use iraplan_core::simulation::{make_rng, monte_carlo_simulate};
//!
//! let config = SimulationConfig {
//!     output: OutputSelect::Single(OutputKind::FutureValueTaxed),
//!     mode: RunMode::MonteCarlo { iterations: 1000 },
//!     ..Default::default()
//! };
//! let result = monte_carlo_simulate(&config, &InputSource::Sampled, &mut make_rng(Some(7)))?;
//! println!("mean = {}", result.stats.mean);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod config;
pub mod error;
pub mod metrics;
pub mod sampling;
pub mod simulation;
pub mod statistics;
pub mod valuation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{InputSource, RunMode, SimulationConfig};
pub use error::{ConfigError, SimulationError, StatisticsError};
pub use model::{
    InputSeries, InputVariableKind, MeanAndVariance, MonteCarloResult, OutputDistributions,
    OutputKind, OutputSelect, SimulationResult,
};
