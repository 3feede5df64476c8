//! Run orchestration: read inputs, drive the simulation, report, persist

use std::io::Write;
use std::path::PathBuf;

use color_eyre::eyre::{Result, eyre};
use iraplan_core::config::{InputSource, SimulationConfig};
use iraplan_core::metrics::RunMetrics;
use iraplan_core::model::MonteCarloResult;
use iraplan_core::simulation::{make_rng, monte_carlo_simulate_with_metrics, simulate_with_metrics};
use tracing::{info, warn};

use crate::io::{read_input_series, write_outputs, write_samples};
use crate::report::{RunOutcome, write_benchmark_line, write_human, write_json, write_timing_line};

/// Everything one invocation needs, after flags and config file are merged
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub config: SimulationConfig,
    /// CSV file with one row of inputs per year
    pub input: Option<PathBuf>,
    /// CSV file receiving the outputs of a single run
    pub output: Option<PathBuf>,
    pub json: bool,
    pub time: bool,
    pub parallel: bool,
    /// Where Monte Carlo samples are written
    pub data_out: PathBuf,
}

/// Execute one run and write its report to `out`
pub fn run<W: Write>(options: &RunOptions, out: &mut W) -> Result<()> {
    let config = &options.config;

    if let Some(path) = &options.output {
        if !options.json {
            writeln!(out, "The output will be stored in the file: {}", path.display())?;
        }
    }

    let source = match &options.input {
        Some(path) => InputSource::Fixed(read_input_series(path, config.years)?),
        None => InputSource::Sampled,
    };

    info!(
        years = config.years,
        mode = ?config.mode,
        output = ?config.output,
        seeded = config.seed.is_some(),
        "starting run"
    );

    if config.mode.is_monte_carlo() {
        let (result, metrics) = run_monte_carlo(options, &source)?;
        info!(
            iterations = result.iterations(),
            mean = result.stats.mean,
            std_dev = result.stats.std_dev(),
            "Monte Carlo statistics"
        );

        report(options, out, &RunOutcome::MonteCarlo(&result), &metrics)?;
        write_samples(&options.data_out, &result.samples, metrics.elapsed_micros())?;

        if options.output.is_some() {
            warn!("Output CSV is not written in Monte Carlo mode; samples go to {}", options.data_out.display());
        }
    } else {
        let mut rng = make_rng(config.seed);
        let (result, metrics) = simulate_with_metrics(config, &source, &mut rng)?;

        report(options, out, &RunOutcome::Single(&result), &metrics)?;

        if let Some(path) = &options.output {
            write_outputs(path, &result.outputs)?;
        }
    }

    Ok(())
}

fn run_monte_carlo(
    options: &RunOptions,
    source: &InputSource,
) -> Result<(MonteCarloResult, RunMetrics)> {
    let config = &options.config;

    if options.parallel {
        #[cfg(feature = "parallel")]
        {
            use rand::Rng;

            let seed = config.seed.unwrap_or_else(|| make_rng(None).random());
            return Ok(iraplan_core::simulation::monte_carlo_simulate_parallel(
                config, source, seed,
            )?);
        }
        #[cfg(not(feature = "parallel"))]
        warn!("Built without the parallel feature; running Monte Carlo sequentially");
    }

    let mut rng = make_rng(config.seed);
    Ok(monte_carlo_simulate_with_metrics(config, source, &mut rng)?)
}

fn report<W: Write>(
    options: &RunOptions,
    out: &mut W,
    outcome: &RunOutcome<'_>,
    metrics: &RunMetrics,
) -> Result<()> {
    if options.config.benchmarking {
        let value = outcome
            .benchmark_value()
            .ok_or_else(|| eyre!("Benchmarking needs a single selected output"))?;
        write_benchmark_line(out, value, metrics.elapsed_micros())?;
        return Ok(());
    }

    if options.json {
        write_json(out, outcome)?;
    } else {
        write_human(out, outcome)?;
    }

    if options.time {
        write_timing_line(out, metrics.elapsed_secs())?;
    }
    Ok(())
}
