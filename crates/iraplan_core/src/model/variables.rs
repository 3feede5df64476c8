use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTRIBUTION_RANGE: (f64, f64) = (5000.0, 10000.0);
pub const DEFAULT_INTEREST_RATE_RANGE: (f64, f64) = (0.5, 1.0);
pub const DEFAULT_TAX_RATE_RANGE: (f64, f64) = (20.0, 40.0);
pub const DEFAULT_WITHDRAWAL_RATE_RANGE: (f64, f64) = (20.0, 40.0);

/// The four uncertain yearly inputs of the account model.
///
/// Contributions are currency amounts; the three rates are percentages
/// (`0.75` means three quarters of a percent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputVariableKind {
    TotalAnnualContribution,
    CompoundedAnnualInterestRate,
    WithdrawalRate,
    AssumedTaxRateOnInterest,
}

impl InputVariableKind {
    pub const COUNT: usize = 4;

    /// All kinds in index order
    pub const ALL: [InputVariableKind; Self::COUNT] = [
        InputVariableKind::TotalAnnualContribution,
        InputVariableKind::CompoundedAnnualInterestRate,
        InputVariableKind::WithdrawalRate,
        InputVariableKind::AssumedTaxRateOnInterest,
    ];

    /// Order in which a year's values are drawn from the random source.
    /// Changing it changes every seeded result.
    pub const SAMPLING_ORDER: [InputVariableKind; Self::COUNT] = [
        InputVariableKind::TotalAnnualContribution,
        InputVariableKind::CompoundedAnnualInterestRate,
        InputVariableKind::AssumedTaxRateOnInterest,
        InputVariableKind::WithdrawalRate,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            InputVariableKind::TotalAnnualContribution => 0,
            InputVariableKind::CompoundedAnnualInterestRate => 1,
            InputVariableKind::WithdrawalRate => 2,
            InputVariableKind::AssumedTaxRateOnInterest => 3,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            InputVariableKind::TotalAnnualContribution => "Total annual contribution",
            InputVariableKind::CompoundedAnnualInterestRate => {
                "Compounded annual interest percentage"
            }
            InputVariableKind::WithdrawalRate => "Withdrawal rate percentage",
            InputVariableKind::AssumedTaxRateOnInterest => {
                "Assumed tax rate on interest percentage"
            }
        }
    }

    /// Column header used for this kind in input CSV files
    #[must_use]
    pub const fn csv_header(self) -> &'static str {
        match self {
            InputVariableKind::TotalAnnualContribution => "total_annual_contribution",
            InputVariableKind::CompoundedAnnualInterestRate => {
                "compounded_annual_interest_percentage"
            }
            InputVariableKind::WithdrawalRate => "withdrawal_rate_percentage",
            InputVariableKind::AssumedTaxRateOnInterest => {
                "assumed_tax_rate_on_interest_percentage"
            }
        }
    }

    /// Long command-line flag that overrides this kind
    #[must_use]
    pub const fn flag_name(self) -> &'static str {
        match self {
            InputVariableKind::TotalAnnualContribution => "total-annual-contribution-to-account",
            InputVariableKind::CompoundedAnnualInterestRate => "compounded-annual-interest-rate",
            InputVariableKind::WithdrawalRate => "withdrawal-rate",
            InputVariableKind::AssumedTaxRateOnInterest => "assumed-tax-rate-on-interest",
        }
    }

    /// Default `[min, max]` of the uniform distribution sampled when no override is given
    #[must_use]
    pub const fn default_range(self) -> (f64, f64) {
        match self {
            InputVariableKind::TotalAnnualContribution => DEFAULT_CONTRIBUTION_RANGE,
            InputVariableKind::CompoundedAnnualInterestRate => DEFAULT_INTEREST_RATE_RANGE,
            InputVariableKind::WithdrawalRate => DEFAULT_WITHDRAWAL_RATE_RANGE,
            InputVariableKind::AssumedTaxRateOnInterest => DEFAULT_TAX_RATE_RANGE,
        }
    }
}
