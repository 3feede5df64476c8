//! Account valuation recurrences
//!
//! Both recurrences start from an empty account and walk the years in order:
//! the year's contribution is added first, then the whole balance grows for
//! one year. All arithmetic is plain `f64`; extreme inputs propagate as
//! ordinary floating-point results.

use crate::model::{InputSeries, InputVariableKind, OutputDistributions, OutputKind, OutputSelect};

/// Future value when interest is taxed every year.
///
/// `growth = rate/100 * (1 - tax/100)`; contributions and principal are not taxed.
///
/// # Panics
/// If `years` exceeds the length of `inputs`.
#[must_use]
pub fn future_value_taxed(years: usize, inputs: &InputSeries) -> f64 {
    check_horizon(years, inputs);

    let contribution = inputs.series(InputVariableKind::TotalAnnualContribution);
    let rate = inputs.series(InputVariableKind::CompoundedAnnualInterestRate);
    let tax_rate = inputs.series(InputVariableKind::AssumedTaxRateOnInterest);

    let mut value = 0.0;
    for i in 0..years {
        let growth = (rate[i] / 100.0) * (1.0 - tax_rate[i] / 100.0);
        value = (value + contribution[i]) * (1.0 + growth);
    }
    value
}

/// Future value when each contribution loses a withdrawal percentage before
/// compounding at the full, untaxed rate.
///
/// # Panics
/// If `years` exceeds the length of `inputs`.
#[must_use]
pub fn future_value_taxed_withdrawal(years: usize, inputs: &InputSeries) -> f64 {
    check_horizon(years, inputs);

    let contribution = inputs.series(InputVariableKind::TotalAnnualContribution);
    let rate = inputs.series(InputVariableKind::CompoundedAnnualInterestRate);
    let withdrawal_rate = inputs.series(InputVariableKind::WithdrawalRate);

    let mut value = 0.0;
    for i in 0..years {
        let growth = rate[i] / 100.0;
        let net_contribution = contribution[i] * (1.0 - withdrawal_rate[i] / 100.0);
        value = (value + net_contribution) * (1.0 + growth);
    }
    value
}

#[inline]
fn check_horizon(years: usize, inputs: &InputSeries) {
    assert!(
        years <= inputs.years(),
        "valuation over {years} years needs at least that many input years (have {})",
        inputs.years()
    );
}

/// Evaluate a single output over the first `years` years
#[must_use]
pub fn evaluate(kind: OutputKind, years: usize, inputs: &InputSeries) -> f64 {
    match kind {
        OutputKind::FutureValueTaxed => future_value_taxed(years, inputs),
        OutputKind::FutureValueTaxedWithdrawal => future_value_taxed_withdrawal(years, inputs),
    }
}

/// Run the recurrences chosen by `select`, storing each result in its slot
#[must_use]
pub fn calculate_outputs(
    select: OutputSelect,
    years: usize,
    inputs: &InputSeries,
) -> OutputDistributions {
    let mut outputs = OutputDistributions::new();
    for kind in select.kinds() {
        outputs.set(kind, evaluate(kind, years, inputs));
    }
    outputs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_series(years: usize, contribution: f64, rate: f64, withdrawal: f64, tax: f64) -> InputSeries {
        InputSeries::from_rows(&vec![[contribution, rate, withdrawal, tax]; years])
    }

    #[test]
    fn test_zero_years_is_zero() {
        let inputs = constant_series(5, 1e9, 50.0, 10.0, 10.0);
        assert_eq!(future_value_taxed(0, &inputs), 0.0);
        assert_eq!(future_value_taxed_withdrawal(0, &inputs), 0.0);

        let empty = InputSeries::zeroed(0);
        assert_eq!(future_value_taxed(0, &empty), 0.0);
        assert_eq!(future_value_taxed_withdrawal(0, &empty), 0.0);
    }

    #[test]
    fn test_taxed_single_year() {
        // 1000 * (1 + 0.10 * 0.75)
        let inputs = constant_series(1, 1000.0, 10.0, 0.0, 25.0);
        let value = future_value_taxed(1, &inputs);
        assert!((value - 1075.0).abs() < 1e-9, "got {value}");
    }

    #[test]
    fn test_taxed_matches_unrolled_computation() {
        let (c, r, tx) = (7500.0, 0.8, 30.0);
        let g = (r / 100.0) * (1.0 - tx / 100.0);

        for n in [1usize, 2, 5, 10] {
            let inputs = constant_series(n, c, r, 0.0, tx);
            let mut expected = 0.0;
            for _ in 0..n {
                expected = (expected + c) * (1.0 + g);
            }
            // Contribute-then-grow annuity due: c * (1+g) * ((1+g)^n - 1) / g
            let closed_form = c * (1.0 + g) * ((1.0 + g).powi(n as i32) - 1.0) / g;

            let value = future_value_taxed(n, &inputs);
            assert!((value - expected).abs() < 1e-9, "n={n}: {value} vs {expected}");
            assert!(
                (value - closed_form).abs() < 1e-6 * closed_form,
                "n={n}: {value} vs closed form {closed_form}"
            );
        }
    }

    #[test]
    fn test_withdrawal_zero_reduces_to_untaxed_compounding() {
        let inputs = InputSeries::from_rows(&[
            [1000.0, 1.0, 0.0, 35.0],
            [2000.0, 0.5, 0.0, 20.0],
            [1500.0, 0.9, 0.0, 40.0],
        ]);

        let mut expected = 0.0;
        for (c, r) in [(1000.0, 1.0), (2000.0, 0.5), (1500.0, 0.9)] {
            expected = (expected + c) * (1.0 + r / 100.0);
        }

        assert_eq!(future_value_taxed_withdrawal(3, &inputs), expected);
    }

    #[test]
    fn test_withdrawal_reduces_contribution_before_growth() {
        // 1000 * 0.8 * 1.05
        let inputs = constant_series(1, 1000.0, 5.0, 20.0, 0.0);
        let value = future_value_taxed_withdrawal(1, &inputs);
        assert!((value - 840.0).abs() < 1e-9, "got {value}");
    }

    #[test]
    fn test_shorter_horizon_uses_prefix() {
        let inputs = InputSeries::from_rows(&[[100.0, 0.0, 0.0, 0.0], [1e6, 0.0, 0.0, 0.0]]);
        assert_eq!(future_value_taxed(1, &inputs), 100.0);
    }

    #[test]
    #[should_panic(expected = "needs at least that many input years")]
    fn test_horizon_longer_than_series_panics() {
        let inputs = constant_series(2, 1.0, 1.0, 1.0, 1.0);
        let _ = future_value_taxed(3, &inputs);
    }

    #[test]
    fn test_calculate_outputs_respects_selection() {
        let inputs = constant_series(3, 5000.0, 0.75, 30.0, 30.0);

        let all = calculate_outputs(OutputSelect::All, 3, &inputs);
        assert_eq!(
            all.get(OutputKind::FutureValueTaxed),
            Some(future_value_taxed(3, &inputs))
        );
        assert_eq!(
            all.get(OutputKind::FutureValueTaxedWithdrawal),
            Some(future_value_taxed_withdrawal(3, &inputs))
        );

        let single = calculate_outputs(
            OutputSelect::Single(OutputKind::FutureValueTaxedWithdrawal),
            3,
            &inputs,
        );
        assert_eq!(single.get(OutputKind::FutureValueTaxed), None);
        assert!(single.get(OutputKind::FutureValueTaxedWithdrawal).is_some());
    }
}
