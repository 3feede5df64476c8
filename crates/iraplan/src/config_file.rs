//! YAML run configuration
//!
//! A run file supplies defaults for everything the command line can set.
//! Flags given on the command line win over values from the file.
//!
//! ```yaml
//! simulation:
//!   years: 30
//!   output:
//!     single: future_value_taxed
//!   mode:
//!     type: monte_carlo
//!     iterations: 10000
//!   seed: 7
//!   inputs:
//!     total_annual_contribution: { type: uniform, min: 0, max: 100000 }
//!     compounded_annual_interest_rate: { type: fixed, value: 7.0 }
//!     withdrawal_rate: { type: uniform, min: 0, max: 100 }
//!     assumed_tax_rate_on_interest: { type: uniform, min: 0, max: 100 }
//! parallel: true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use iraplan_core::config::SimulationConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfigFile {
    pub simulation: SimulationConfig,
    /// CSV file with one row of inputs per year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    /// CSV file receiving the computed outputs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub json: bool,
    pub time: bool,
    pub parallel: bool,
}

impl RunConfigFile {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Save to YAML string
    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Could not read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .wrap_err_with(|| format!("Could not parse config file {}", path.display()))
    }
}
