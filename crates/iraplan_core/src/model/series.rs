use serde::{Deserialize, Serialize};

use super::variables::InputVariableKind;
use crate::error::ConfigError;

/// Per-year values for all four input variables.
///
/// Every series has exactly `years()` entries, so the valuation kernel can
/// index any of them for every year without a bounds check failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesColumns")]
pub struct InputSeries {
    years: usize,
    values: [Vec<f64>; InputVariableKind::COUNT],
}

/// Unchecked wire form; deserialization goes through [`InputSeries::from_columns`]
#[derive(Deserialize)]
struct SeriesColumns {
    years: usize,
    values: [Vec<f64>; InputVariableKind::COUNT],
}

impl TryFrom<SeriesColumns> for InputSeries {
    type Error = ConfigError;

    fn try_from(raw: SeriesColumns) -> Result<Self, ConfigError> {
        let series = Self::from_columns(raw.values)?;
        if series.years != raw.years {
            return Err(ConfigError::SeriesTooShort {
                years: raw.years.max(series.years),
                available: raw.years.min(series.years),
            });
        }
        Ok(series)
    }
}

impl InputSeries {
    /// Zero-filled series covering `years` years
    #[must_use]
    pub fn zeroed(years: usize) -> Self {
        Self {
            years,
            values: std::array::from_fn(|_| vec![0.0; years]),
        }
    }

    /// Build from one row per year, each row indexed by [`InputVariableKind::index`]
    #[must_use]
    pub fn from_rows(rows: &[[f64; InputVariableKind::COUNT]]) -> Self {
        let mut series = Self::zeroed(rows.len());
        for (year, row) in rows.iter().enumerate() {
            for kind in InputVariableKind::ALL {
                series.values[kind.index()][year] = row[kind.index()];
            }
        }
        series
    }

    /// Build from four columns. All columns must have the same length.
    pub fn from_columns(columns: [Vec<f64>; InputVariableKind::COUNT]) -> Result<Self, ConfigError> {
        let years = columns[0].len();
        if let Some(short) = columns.iter().map(Vec::len).find(|len| *len != years) {
            return Err(ConfigError::SeriesTooShort {
                years: years.max(short),
                available: years.min(short),
            });
        }
        Ok(Self {
            years,
            values: columns,
        })
    }

    /// Number of years every series covers
    #[must_use]
    pub fn years(&self) -> usize {
        self.years
    }

    #[must_use]
    pub fn series(&self, kind: InputVariableKind) -> &[f64] {
        &self.values[kind.index()]
    }

    pub(crate) fn set(&mut self, kind: InputVariableKind, year: usize, value: f64) {
        self.values[kind.index()][year] = value;
    }

    /// Value of `kind` in the first year, if there is one
    #[must_use]
    pub fn first_year(&self, kind: InputVariableKind) -> Option<f64> {
        self.series(kind).first().copied()
    }

    /// Keep only the first `years` years.
    pub fn truncated(&self, years: usize) -> Result<Self, ConfigError> {
        if years > self.years {
            return Err(ConfigError::SeriesTooShort {
                years,
                available: self.years,
            });
        }
        Ok(Self {
            years,
            values: std::array::from_fn(|i| self.values[i][..years].to_vec()),
        })
    }
}
