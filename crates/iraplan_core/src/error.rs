use std::fmt;

use crate::model::InputVariableKind;

/// Errors raised while validating a run configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Output selection index outside `0..OutputKind::COUNT`
    OutputSelectOutOfRange { index: usize, max: usize },
    /// "All outputs" requested in a mode that collects one scalar per run
    AllOutputsNotAllowed { mode: &'static str },
    NegativeYears(i64),
    ZeroIterations,
    /// Monte Carlo mode combined with fixed per-variable overrides
    MonteCarloWithOverrides(Vec<InputVariableKind>),
    /// Monte Carlo mode combined with a read-once input series
    MonteCarloWithFixedSeries,
    /// Uniform bounds that are inverted or not finite
    InvalidRange {
        kind: InputVariableKind,
        min: f64,
        max: f64,
    },
    /// Override text that is not a floating-point number
    Parse {
        kind: InputVariableKind,
        text: String,
    },
    /// Fixed input series shorter than the configured horizon
    SeriesTooShort { years: usize, available: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutputSelectOutOfRange { index, max } => {
                write!(f, "output select {index} must be in the range [0, {max}]")
            }
            ConfigError::AllOutputsNotAllowed { mode } => {
                write!(f, "please select a single output when in {mode} mode")
            }
            ConfigError::NegativeYears(years) => {
                write!(
                    f,
                    "the number of years to retirement must be non-negative (got {years})"
                )
            }
            ConfigError::ZeroIterations => {
                write!(f, "the number of Monte Carlo iterations must be at least 1")
            }
            ConfigError::MonteCarloWithOverrides(kinds) => {
                let names: Vec<&str> = kinds.iter().map(|k| k.flag_name()).collect();
                write!(
                    f,
                    "Monte Carlo mode cannot be combined with fixed input values ({})",
                    names.join(", ")
                )
            }
            ConfigError::MonteCarloWithFixedSeries => {
                write!(f, "Monte Carlo mode cannot be combined with a fixed input series")
            }
            ConfigError::InvalidRange { kind, min, max } => {
                write!(
                    f,
                    "invalid uniform range for {} (min={min}, max={max})",
                    kind.description()
                )
            }
            ConfigError::Parse { kind, text } => {
                write!(
                    f,
                    "could not parse {text:?} as a number for {}",
                    kind.description()
                )
            }
            ConfigError::SeriesTooShort { years, available } => {
                write!(
                    f,
                    "input series covers {available} years but {years} years were requested"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors from reducing Monte Carlo samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsError {
    EmptySamples,
}

impl fmt::Display for StatisticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatisticsError::EmptySamples => {
                write!(f, "cannot compute mean and variance of an empty sample set")
            }
        }
    }
}

impl std::error::Error for StatisticsError {}

/// Errors surfaced by the simulation driver
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Config(ConfigError),
    Statistics(StatisticsError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Config(e) => write!(f, "configuration error: {e}"),
            SimulationError::Statistics(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            SimulationError::Statistics(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(err: ConfigError) -> Self {
        SimulationError::Config(err)
    }
}

impl From<StatisticsError> for SimulationError {
    fn from(err: StatisticsError) -> Self {
        SimulationError::Statistics(err)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
