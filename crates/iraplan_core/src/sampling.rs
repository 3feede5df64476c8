//! Per-year input sampling
//!
//! Each input variable is described by an [`InputProfile`]: either a fixed
//! override that yields the same value every year, or a uniform distribution
//! drawn independently for every year. A [`Sampler`] validates the profiles
//! once and then fills [`InputSeries`] from an explicitly passed random source.

use rand::{Rng, distr::Distribution};
use rand_distr::Uniform;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{InputSeries, InputVariableKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputProfile {
    /// Constant value for every year. Never consumes the random source.
    Fixed { value: f64 },
    /// Independent draw per year from `Uniform[min, max]`
    Uniform { min: f64, max: f64 },
}

impl InputProfile {
    /// The uniform distribution sampled when no override is given
    #[must_use]
    pub fn default_for(kind: InputVariableKind) -> Self {
        let (min, max) = kind.default_range();
        InputProfile::Uniform { min, max }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, InputProfile::Fixed { .. })
    }
}

/// One profile per input variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputProfiles {
    pub total_annual_contribution: InputProfile,
    pub compounded_annual_interest_rate: InputProfile,
    pub withdrawal_rate: InputProfile,
    pub assumed_tax_rate_on_interest: InputProfile,
}

impl Default for InputProfiles {
    fn default() -> Self {
        Self {
            total_annual_contribution: InputProfile::default_for(
                InputVariableKind::TotalAnnualContribution,
            ),
            compounded_annual_interest_rate: InputProfile::default_for(
                InputVariableKind::CompoundedAnnualInterestRate,
            ),
            withdrawal_rate: InputProfile::default_for(InputVariableKind::WithdrawalRate),
            assumed_tax_rate_on_interest: InputProfile::default_for(
                InputVariableKind::AssumedTaxRateOnInterest,
            ),
        }
    }
}

impl InputProfiles {
    #[must_use]
    pub fn get(&self, kind: InputVariableKind) -> &InputProfile {
        match kind {
            InputVariableKind::TotalAnnualContribution => &self.total_annual_contribution,
            InputVariableKind::CompoundedAnnualInterestRate => {
                &self.compounded_annual_interest_rate
            }
            InputVariableKind::WithdrawalRate => &self.withdrawal_rate,
            InputVariableKind::AssumedTaxRateOnInterest => &self.assumed_tax_rate_on_interest,
        }
    }

    pub fn set(&mut self, kind: InputVariableKind, profile: InputProfile) {
        match kind {
            InputVariableKind::TotalAnnualContribution => self.total_annual_contribution = profile,
            InputVariableKind::CompoundedAnnualInterestRate => {
                self.compounded_annual_interest_rate = profile;
            }
            InputVariableKind::WithdrawalRate => self.withdrawal_rate = profile,
            InputVariableKind::AssumedTaxRateOnInterest => {
                self.assumed_tax_rate_on_interest = profile;
            }
        }
    }

    /// Builder-style variant of [`InputProfiles::set`] for a fixed override
    #[must_use]
    pub fn with_fixed(mut self, kind: InputVariableKind, value: f64) -> Self {
        self.set(kind, InputProfile::Fixed { value });
        self
    }

    /// Kinds that carry a fixed override, in index order
    #[must_use]
    pub fn fixed_kinds(&self) -> Vec<InputVariableKind> {
        InputVariableKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_fixed())
            .collect()
    }
}

/// Parse a command-line override the way `str::parse::<f64>` does, after trimming.
pub fn parse_override(kind: InputVariableKind, text: &str) -> Result<f64, ConfigError> {
    text.trim().parse::<f64>().map_err(|_| ConfigError::Parse {
        kind,
        text: text.to_string(),
    })
}

#[derive(Debug, Clone)]
enum PreparedProfile {
    Fixed(f64),
    Uniform(Uniform<f64>),
}

/// Validated profiles ready to draw from
#[derive(Debug, Clone)]
pub struct Sampler {
    profiles: [PreparedProfile; InputVariableKind::COUNT],
}

impl Sampler {
    pub fn new(profiles: &InputProfiles) -> Result<Self, ConfigError> {
        let [a, b, c, d] = InputVariableKind::ALL;
        Ok(Self {
            profiles: [
                prepare(a, profiles.get(a))?,
                prepare(b, profiles.get(b))?,
                prepare(c, profiles.get(c))?,
                prepare(d, profiles.get(d))?,
            ],
        })
    }

    /// Random values consumed per simulated year
    #[must_use]
    pub fn draws_per_year(&self) -> u64 {
        self.profiles
            .iter()
            .filter(|p| matches!(p, PreparedProfile::Uniform(_)))
            .count() as u64
    }

    /// Draw one value for `kind`
    pub fn sample<R: Rng + ?Sized>(&self, kind: InputVariableKind, rng: &mut R) -> f64 {
        match &self.profiles[kind.index()] {
            PreparedProfile::Fixed(value) => *value,
            PreparedProfile::Uniform(dist) => dist.sample(rng),
        }
    }

    /// Overwrite every year of `series` with fresh draws.
    ///
    /// Years are filled in order; within a year the kinds are drawn in
    /// [`InputVariableKind::SAMPLING_ORDER`].
    pub fn fill<R: Rng + ?Sized>(&self, rng: &mut R, series: &mut InputSeries) {
        for year in 0..series.years() {
            for kind in InputVariableKind::SAMPLING_ORDER {
                let value = self.sample(kind, rng);
                series.set(kind, year, value);
            }
        }
    }

    /// Draw a fresh series covering `years` years
    pub fn sample_series<R: Rng + ?Sized>(&self, rng: &mut R, years: usize) -> InputSeries {
        let mut series = InputSeries::zeroed(years);
        self.fill(rng, &mut series);
        series
    }
}

fn prepare(kind: InputVariableKind, profile: &InputProfile) -> Result<PreparedProfile, ConfigError> {
    match *profile {
        InputProfile::Fixed { value } => Ok(PreparedProfile::Fixed(value)),
        InputProfile::Uniform { min, max } => {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(ConfigError::InvalidRange { kind, min, max });
            }
            Uniform::new_inclusive(min, max)
                .map(PreparedProfile::Uniform)
                .map_err(|_| ConfigError::InvalidRange { kind, min, max })
        }
    }
}
