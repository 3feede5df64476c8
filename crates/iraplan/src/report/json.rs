use std::io::Write;

use color_eyre::eyre::{Result, WrapErr};
use iraplan_core::model::InputVariableKind;
use serde::{Deserialize, Serialize};

use super::RunOutcome;

const REPORT_DESCRIPTION: &str = "Input and output variables";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonVariable {
    pub symbol: String,
    pub description: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub description: String,
    pub variables: Vec<JsonVariable>,
}

impl JsonReport {
    /// One entry per input variable (its first-year value) followed by one
    /// per reported output
    pub fn from_outcome(outcome: &RunOutcome<'_>) -> Self {
        let inputs = outcome.inputs();
        let mut variables: Vec<JsonVariable> = InputVariableKind::ALL
            .into_iter()
            .map(|kind| JsonVariable {
                symbol: format!("inputVariables[{}]", kind.index()),
                description: kind.description().to_string(),
                values: inputs.first_year(kind).into_iter().collect(),
            })
            .collect();

        variables.extend(
            outcome
                .output_values()
                .into_iter()
                .map(|(kind, values)| JsonVariable {
                    symbol: format!("outputDistributions[{}]", kind.index()),
                    description: kind.description().to_string(),
                    values,
                }),
        );

        Self {
            description: REPORT_DESCRIPTION.to_string(),
            variables,
        }
    }
}

pub fn write_json<W: Write>(out: &mut W, outcome: &RunOutcome<'_>) -> Result<()> {
    let report = JsonReport::from_outcome(outcome);
    serde_json::to_writer_pretty(&mut *out, &report).wrap_err("Failed to serialize JSON output")?;
    writeln!(out)?;
    Ok(())
}
