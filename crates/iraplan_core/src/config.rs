//! Simulation configuration
//!
//! [`SimulationConfig`] holds everything the driver needs apart from the
//! random source and, for read-once runs, the input series itself.
//!
//! ```ignore
//! use iraplan_core::config::{RunMode, SimulationConfig};
//! use iraplan_core::model::{InputVariableKind, OutputKind, OutputSelect};
//!
//! let config = SimulationConfig {
//!     years: 30,
//!     output: OutputSelect::Single(OutputKind::FutureValueTaxed),
//!     mode: RunMode::MonteCarlo { iterations: 10_000 },
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{InputSeries, OutputSelect};
use crate::sampling::{InputProfiles, Sampler};

pub const DEFAULT_YEARS_TO_RETIREMENT: usize = 20;

/// How many times the kernel runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunMode {
    /// One evaluation of the selected outputs
    #[default]
    Single,
    /// Independent re-sampling and evaluation per iteration
    MonteCarlo { iterations: usize },
}

impl RunMode {
    #[must_use]
    pub fn iterations(self) -> usize {
        match self {
            RunMode::Single => 1,
            RunMode::MonteCarlo { iterations } => iterations,
        }
    }

    #[must_use]
    pub fn is_monte_carlo(self) -> bool {
        matches!(self, RunMode::MonteCarlo { .. })
    }
}

/// Where the yearly inputs come from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Draw fresh series from the configured profiles for every run
    Sampled,
    /// Use the same series for the run, e.g. one read from a file
    Fixed(InputSeries),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of years to retirement
    pub years: usize,
    pub inputs: InputProfiles,
    pub output: OutputSelect,
    pub mode: RunMode,
    /// Report a single scalar plus timing instead of full output
    pub benchmarking: bool,
    /// Seed for the random source. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            years: DEFAULT_YEARS_TO_RETIREMENT,
            inputs: InputProfiles::default(),
            output: OutputSelect::All,
            mode: RunMode::Single,
            benchmarking: false,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Convert a signed year count, rejecting negative values
    pub fn years_from_signed(years: i64) -> Result<usize, ConfigError> {
        usize::try_from(years).map_err(|_| ConfigError::NegativeYears(years))
    }

    /// Check flag combinations and profile ranges. Runs before any sampling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_output_select()?;
        self.check_iterations()?;
        self.check_overrides()?;
        Sampler::new(&self.inputs)?;
        Ok(())
    }

    /// "All outputs" is only meaningful for a plain single run
    pub fn check_output_select(&self) -> Result<(), ConfigError> {
        if !self.output.is_all() {
            return Ok(());
        }
        if self.benchmarking {
            return Err(ConfigError::AllOutputsNotAllowed {
                mode: "benchmarking",
            });
        }
        if self.mode.is_monte_carlo() {
            return Err(ConfigError::AllOutputsNotAllowed {
                mode: "Monte Carlo",
            });
        }
        Ok(())
    }

    pub fn check_iterations(&self) -> Result<(), ConfigError> {
        if self.mode == (RunMode::MonteCarlo { iterations: 0 }) {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }

    /// Monte Carlo re-samples every input, so fixed overrides are rejected
    pub fn check_overrides(&self) -> Result<(), ConfigError> {
        if self.mode.is_monte_carlo() {
            let fixed = self.inputs.fixed_kinds();
            if !fixed.is_empty() {
                return Err(ConfigError::MonteCarloWithOverrides(fixed));
            }
        }
        Ok(())
    }

    /// [`SimulationConfig::validate`] plus the checks that depend on the input source
    pub fn validate_with_source(&self, source: &InputSource) -> Result<(), ConfigError> {
        if let InputSource::Fixed(series) = source {
            if self.mode.is_monte_carlo() {
                return Err(ConfigError::MonteCarloWithFixedSeries);
            }
            if series.years() < self.years {
                return Err(ConfigError::SeriesTooShort {
                    years: self.years,
                    available: series.years(),
                });
            }
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InputVariableKind, OutputKind};

    fn single_output() -> OutputSelect {
        OutputSelect::Single(OutputKind::FutureValueTaxed)
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.years, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_all_outputs_rejected_in_monte_carlo() {
        let config = SimulationConfig {
            mode: RunMode::MonteCarlo { iterations: 10 },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AllOutputsNotAllowed {
                mode: "Monte Carlo"
            })
        );
    }

    #[test]
    fn test_all_outputs_rejected_when_benchmarking() {
        let config = SimulationConfig {
            benchmarking: true,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AllOutputsNotAllowed {
                mode: "benchmarking"
            })
        );
    }

    #[test]
    fn test_monte_carlo_with_overrides_rejected() {
        let config = SimulationConfig {
            output: single_output(),
            mode: RunMode::MonteCarlo { iterations: 10 },
            inputs: InputProfiles::default()
                .with_fixed(InputVariableKind::CompoundedAnnualInterestRate, 0.8),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MonteCarloWithOverrides(vec![
                InputVariableKind::CompoundedAnnualInterestRate
            ]))
        );
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = SimulationConfig {
            output: single_output(),
            mode: RunMode::MonteCarlo { iterations: 0 },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations));
    }

    #[test]
    fn test_monte_carlo_with_fixed_series_rejected() {
        let config = SimulationConfig {
            years: 2,
            output: single_output(),
            mode: RunMode::MonteCarlo { iterations: 10 },
            ..Default::default()
        };
        let source = InputSource::Fixed(InputSeries::zeroed(2));
        assert_eq!(
            config.validate_with_source(&source),
            Err(ConfigError::MonteCarloWithFixedSeries)
        );
    }

    #[test]
    fn test_fixed_series_must_cover_horizon() {
        let config = SimulationConfig {
            years: 5,
            ..Default::default()
        };
        let source = InputSource::Fixed(InputSeries::zeroed(3));
        assert_eq!(
            config.validate_with_source(&source),
            Err(ConfigError::SeriesTooShort {
                years: 5,
                available: 3
            })
        );
    }

    #[test]
    fn test_output_select_checked_before_iterations() {
        let config = SimulationConfig {
            mode: RunMode::MonteCarlo { iterations: 0 },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AllOutputsNotAllowed {
                mode: "Monte Carlo"
            })
        );
    }

    #[test]
    fn test_years_from_signed() {
        assert_eq!(SimulationConfig::years_from_signed(0), Ok(0));
        assert_eq!(SimulationConfig::years_from_signed(30), Ok(30));
        assert_eq!(
            SimulationConfig::years_from_signed(-1),
            Err(ConfigError::NegativeYears(-1))
        );
    }
}
