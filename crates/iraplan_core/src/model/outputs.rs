use serde::{Deserialize, Serialize};

use super::variables::InputVariableKind;
use crate::error::ConfigError;

/// The valuation formulas the kernel can evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Yearly contributions compound at the after-tax interest rate
    FutureValueTaxed,
    /// Contributions are reduced by a withdrawal rate, then compound untaxed
    FutureValueTaxedWithdrawal,
}

impl OutputKind {
    pub const COUNT: usize = 2;

    pub const ALL: [OutputKind; Self::COUNT] =
        [OutputKind::FutureValueTaxed, OutputKind::FutureValueTaxedWithdrawal];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            OutputKind::FutureValueTaxed => 0,
            OutputKind::FutureValueTaxedWithdrawal => 1,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            OutputKind::FutureValueTaxed => "futureValueTaxed",
            OutputKind::FutureValueTaxedWithdrawal => "futureValueTaxFreeWithWithdrawalTax",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            OutputKind::FutureValueTaxed => {
                "Future value, for yearly taxable payments (compounded annually)"
            }
            OutputKind::FutureValueTaxedWithdrawal => {
                "Future value, for yearly tax-free payments and taxed withdrawal-events (compounded annually)"
            }
        }
    }

    /// Input series this output's recurrence reads
    #[must_use]
    pub const fn required_inputs(self) -> [InputVariableKind; 3] {
        match self {
            OutputKind::FutureValueTaxed => [
                InputVariableKind::TotalAnnualContribution,
                InputVariableKind::CompoundedAnnualInterestRate,
                InputVariableKind::AssumedTaxRateOnInterest,
            ],
            OutputKind::FutureValueTaxedWithdrawal => [
                InputVariableKind::TotalAnnualContribution,
                InputVariableKind::CompoundedAnnualInterestRate,
                InputVariableKind::WithdrawalRate,
            ],
        }
    }
}

/// Which outputs a run computes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSelect {
    #[default]
    All,
    Single(OutputKind),
}

impl OutputSelect {
    /// Build a selection from an optional 0-based output index.
    /// `None` selects every output.
    pub fn from_index(index: Option<usize>) -> Result<Self, ConfigError> {
        match index {
            None => Ok(OutputSelect::All),
            Some(i) => OutputKind::from_index(i).map(OutputSelect::Single).ok_or(
                ConfigError::OutputSelectOutOfRange {
                    index: i,
                    max: OutputKind::COUNT - 1,
                },
            ),
        }
    }

    #[must_use]
    pub fn is_all(self) -> bool {
        matches!(self, OutputSelect::All)
    }

    /// The single selected kind, if exactly one is selected
    #[must_use]
    pub fn single(self) -> Option<OutputKind> {
        match self {
            OutputSelect::All => None,
            OutputSelect::Single(kind) => Some(kind),
        }
    }

    /// Selected kinds in index order
    pub fn kinds(self) -> impl Iterator<Item = OutputKind> {
        OutputKind::ALL
            .into_iter()
            .filter(move |kind| self.includes(*kind))
    }

    #[must_use]
    pub fn includes(self, kind: OutputKind) -> bool {
        match self {
            OutputSelect::All => true,
            OutputSelect::Single(selected) => selected == kind,
        }
    }
}

/// Values computed by one run, one slot per output kind.
/// Slots for unselected outputs stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputDistributions {
    values: [Option<f64>; OutputKind::COUNT],
}

impl OutputDistributions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: OutputKind, value: f64) {
        self.values[kind.index()] = Some(value);
    }

    #[must_use]
    pub fn get(&self, kind: OutputKind) -> Option<f64> {
        self.values[kind.index()]
    }

    /// Computed `(kind, value)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (OutputKind, f64)> + '_ {
        OutputKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|value| (kind, value)))
    }
}
