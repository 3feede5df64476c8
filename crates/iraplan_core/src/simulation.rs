use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rand::RngCore;
#[cfg(feature = "parallel")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::config::{InputSource, SimulationConfig};
use crate::error::{ConfigError, Result};
use crate::metrics::{RunMetrics, RunTimer};
use crate::model::{InputSeries, MonteCarloResult, OutputKind, SimulationResult};
use crate::sampling::Sampler;
use crate::statistics::mean_and_variance;
use crate::valuation::{calculate_outputs, evaluate};

/// Random source for a run: seeded when a seed is given, from OS entropy otherwise
#[must_use]
pub fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

pub fn simulate<R: Rng + ?Sized>(
    config: &SimulationConfig,
    source: &InputSource,
    rng: &mut R,
) -> Result<SimulationResult> {
    simulate_with_metrics(config, source, rng).map(|(result, _)| result)
}

/// Single run: one set of series, every selected output evaluated once.
pub fn simulate_with_metrics<R: Rng + ?Sized>(
    config: &SimulationConfig,
    source: &InputSource,
    rng: &mut R,
) -> Result<(SimulationResult, RunMetrics)> {
    config.validate_with_source(source)?;
    let sampler = Sampler::new(&config.inputs)?;

    let mut metrics = RunMetrics::new();
    let timer = RunTimer::start();

    let (inputs, draws) = match source {
        InputSource::Sampled => {
            let series = sampler.sample_series(rng, config.years);
            (series, sampler.draws_per_year() * config.years as u64)
        }
        InputSource::Fixed(series) => (series.truncated(config.years)?, 0),
    };
    let outputs = calculate_outputs(config.output, config.years, &inputs);
    metrics.record_iteration(draws);

    timer.stop(&mut metrics);
    debug!(
        years = config.years,
        elapsed_us = metrics.elapsed_micros(),
        "single run complete"
    );

    Ok((SimulationResult { inputs, outputs }, metrics))
}

pub fn monte_carlo_simulate<R: Rng + ?Sized>(
    config: &SimulationConfig,
    source: &InputSource,
    rng: &mut R,
) -> Result<MonteCarloResult> {
    monte_carlo_simulate_with_metrics(config, source, rng).map(|(result, _)| result)
}

/// Sequential Monte Carlo: every iteration re-samples all series and stores
/// the selected output at its iteration index, then the samples are reduced
/// to mean and variance.
pub fn monte_carlo_simulate_with_metrics<R: Rng + ?Sized>(
    config: &SimulationConfig,
    source: &InputSource,
    rng: &mut R,
) -> Result<(MonteCarloResult, RunMetrics)> {
    let (sampler, output) = prepare_monte_carlo(config, source)?;
    let iterations = config.mode.iterations();

    let mut metrics = RunMetrics::new();
    let timer = RunTimer::start();

    let (samples, last_inputs) = run_batch(
        &sampler,
        output,
        config.years,
        iterations,
        rng,
        &mut metrics,
    );
    let stats = mean_and_variance(&samples)?;

    timer.stop(&mut metrics);
    debug!(
        iterations,
        mean = stats.mean,
        variance = stats.variance,
        elapsed_us = metrics.elapsed_micros(),
        "Monte Carlo run complete"
    );

    Ok((
        MonteCarloResult {
            output,
            samples,
            stats,
            last_inputs,
        },
        metrics,
    ))
}

/// Parallel Monte Carlo over batches of iterations.
///
/// Batch seeds come from one generator seeded with `seed`, so a given seed
/// always yields the same samples in the same (iteration) order, though not
/// the same samples as [`monte_carlo_simulate`].
#[cfg(feature = "parallel")]
pub fn monte_carlo_simulate_parallel(
    config: &SimulationConfig,
    source: &InputSource,
    seed: u64,
) -> Result<(MonteCarloResult, RunMetrics)> {
    const MAX_BATCH_SIZE: usize = 100;

    let (sampler, output) = prepare_monte_carlo(config, source)?;
    let iterations = config.mode.iterations();
    let num_batches = iterations.div_ceil(MAX_BATCH_SIZE);

    let mut master = SmallRng::seed_from_u64(seed);
    let batch_seeds: Vec<u64> = (0..num_batches).map(|_| master.next_u64()).collect();

    let mut metrics = RunMetrics::new();
    let timer = RunTimer::start();

    // Indexed collect keeps batches in order, so samples stay in iteration order
    let batches: Vec<(Vec<f64>, InputSeries, RunMetrics)> = batch_seeds
        .into_par_iter()
        .enumerate()
        .map(|(i, batch_seed)| {
            let mut rng = SmallRng::seed_from_u64(batch_seed);
            let batch_size = if i == num_batches - 1 {
                iterations - i * MAX_BATCH_SIZE
            } else {
                MAX_BATCH_SIZE
            };
            let mut batch_metrics = RunMetrics::new();
            let (samples, last) = run_batch(
                &sampler,
                output,
                config.years,
                batch_size,
                &mut rng,
                &mut batch_metrics,
            );
            (samples, last, batch_metrics)
        })
        .collect();

    let mut samples = Vec::with_capacity(iterations);
    let mut last_inputs = InputSeries::zeroed(config.years);
    for (batch_samples, last, batch_metrics) in batches {
        samples.extend(batch_samples);
        last_inputs = last;
        metrics.merge_counts(&batch_metrics);
    }
    let stats = mean_and_variance(&samples)?;

    timer.stop(&mut metrics);
    debug!(
        iterations,
        batches = num_batches,
        mean = stats.mean,
        elapsed_us = metrics.elapsed_micros(),
        "parallel Monte Carlo run complete"
    );

    Ok((
        MonteCarloResult {
            output,
            samples,
            stats,
            last_inputs,
        },
        metrics,
    ))
}

fn prepare_monte_carlo(
    config: &SimulationConfig,
    source: &InputSource,
) -> Result<(Sampler, OutputKind)> {
    config.validate_with_source(source)?;
    // Every iteration re-samples, so a read-once series would be discarded
    if matches!(source, InputSource::Fixed(_)) {
        return Err(ConfigError::MonteCarloWithFixedSeries.into());
    }
    if !config.mode.is_monte_carlo() {
        debug!("Monte Carlo driver called in single-run mode; running one iteration");
    }
    let output = config
        .output
        .single()
        .ok_or(ConfigError::AllOutputsNotAllowed {
            mode: "Monte Carlo",
        })?;
    let sampler = Sampler::new(&config.inputs)?;
    Ok((sampler, output))
}

/// Run `iterations` independent iterations, reusing one scratch series.
/// Returns the samples in order and the inputs of the final iteration.
fn run_batch<R: Rng + ?Sized>(
    sampler: &Sampler,
    output: OutputKind,
    years: usize,
    iterations: usize,
    rng: &mut R,
    metrics: &mut RunMetrics,
) -> (Vec<f64>, InputSeries) {
    let draws = sampler.draws_per_year() * years as u64;
    let mut scratch = InputSeries::zeroed(years);
    let mut samples = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        sampler.fill(rng, &mut scratch);
        samples.push(evaluate(output, years, &scratch));
        metrics.record_iteration(draws);
    }

    (samples, scratch)
}
