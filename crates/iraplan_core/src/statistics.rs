//! Sample aggregation

use crate::error::StatisticsError;
use crate::model::MeanAndVariance;

/// Arithmetic mean and population variance (divisor `N`) of `samples`.
///
/// Two passes: the mean first, then the squared deviations from it, which
/// avoids the cancellation of the sum-of-squares formula for large values.
pub fn mean_and_variance(samples: &[f64]) -> Result<MeanAndVariance, StatisticsError> {
    if samples.is_empty() {
        return Err(StatisticsError::EmptySamples);
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    Ok(MeanAndVariance { mean, variance })
}
