//! Command-line arguments and their resolution into a run

use std::path::PathBuf;

use clap::Parser;
use iraplan_core::config::{RunMode, SimulationConfig};
use iraplan_core::error::ConfigError;
use iraplan_core::model::{InputVariableKind, OutputSelect};
use iraplan_core::sampling::{InputProfile, parse_override};
use tracing::warn;

use crate::app::RunOptions;
use crate::config_file::RunConfigFile;
use crate::io::DATA_OUT_FILE;

#[derive(Parser, Debug, Clone)]
#[command(name = "iraplan")]
#[command(about = "Future value of a tax-advantaged retirement account under uncertain yearly inputs")]
pub struct Args {
    /// Number of years to retirement (default: 20)
    #[arg(short = 'n', long = "number-of-years", allow_negative_numbers = true)]
    pub years: Option<i64>,

    /// Fixed total annual contribution to the account
    #[arg(
        short = 't',
        long = "total-annual-contribution-to-account",
        allow_hyphen_values = true
    )]
    pub total_annual_contribution: Option<String>,

    /// Fixed compounded annual interest rate, in percent
    #[arg(
        short = 'c',
        long = "compounded-annual-interest-rate",
        allow_hyphen_values = true
    )]
    pub compounded_annual_interest_rate: Option<String>,

    /// Fixed tax rate on interest, in percent
    #[arg(
        short = 'r',
        long = "assumed-tax-rate-on-interest",
        allow_hyphen_values = true
    )]
    pub assumed_tax_rate_on_interest: Option<String>,

    /// Fixed withdrawal rate, in percent
    #[arg(short = 'w', long = "withdrawal-rate", allow_hyphen_values = true)]
    pub withdrawal_rate: Option<String>,

    /// Output to compute: 0 = futureValueTaxed, 1 = futureValueTaxFreeWithWithdrawalTax (default: all)
    #[arg(short = 'S', long = "select-output")]
    pub select_output: Option<usize>,

    /// Run in Monte Carlo mode with this many iterations
    #[arg(short = 'M', long = "multiple-executions")]
    pub iterations: Option<usize>,

    /// Print only the selected value and the elapsed microseconds
    #[arg(short = 'b', long)]
    pub benchmarking: bool,

    /// Print the elapsed time after the results
    #[arg(short = 'T', long)]
    pub time: bool,

    /// Print results as JSON
    #[arg(short = 'j', long)]
    pub json: bool,

    /// CSV file with one row of inputs per year
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// CSV file to write the computed outputs to
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Seed for the random source (default: OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run Monte Carlo iterations across threads
    #[arg(long)]
    pub parallel: bool,

    /// YAML run file supplying defaults for these flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Override text per input kind, in index order
    fn overrides(&self) -> [(InputVariableKind, Option<&str>); InputVariableKind::COUNT] {
        [
            (
                InputVariableKind::TotalAnnualContribution,
                self.total_annual_contribution.as_deref(),
            ),
            (
                InputVariableKind::CompoundedAnnualInterestRate,
                self.compounded_annual_interest_rate.as_deref(),
            ),
            (
                InputVariableKind::WithdrawalRate,
                self.withdrawal_rate.as_deref(),
            ),
            (
                InputVariableKind::AssumedTaxRateOnInterest,
                self.assumed_tax_rate_on_interest.as_deref(),
            ),
        ]
    }

    /// Merge the flags over `file` and validate the result.
    ///
    /// Checks run in a fixed order and the first failure is returned: output
    /// selection range, "all outputs" with benchmarking or Monte Carlo,
    /// iteration count, year count, override parsing, Monte Carlo with
    /// overrides, Monte Carlo with an input file.
    pub fn resolve(&self, file: RunConfigFile) -> Result<RunOptions, ConfigError> {
        let mut config: SimulationConfig = file.simulation;

        if let Some(index) = self.select_output {
            config.output = OutputSelect::from_index(Some(index))?;
        }
        if let Some(iterations) = self.iterations {
            config.mode = RunMode::MonteCarlo { iterations };
        }
        config.benchmarking |= self.benchmarking;
        config.check_output_select()?;
        config.check_iterations()?;

        if let Some(years) = self.years {
            config.years = SimulationConfig::years_from_signed(years)?;
        }

        let mut fixed = Vec::new();
        for (kind, text) in self.overrides() {
            if let Some(text) = text {
                fixed.push((kind, parse_override(kind, text)?));
            }
        }

        let input = self.input.clone().or(file.input);
        if input.is_some() && !fixed.is_empty() {
            warn!("When reading data from an input file, input variable arguments are ignored");
        } else {
            for (kind, value) in fixed {
                config.inputs.set(kind, InputProfile::Fixed { value });
            }
        }

        config.check_overrides()?;
        if input.is_some() && config.mode.is_monte_carlo() {
            return Err(ConfigError::MonteCarloWithFixedSeries);
        }

        config.seed = self.seed.or(config.seed);
        config.validate()?;

        Ok(RunOptions {
            config,
            input,
            output: self.output.clone().or(file.output),
            json: self.json || file.json,
            time: self.time || file.time,
            parallel: self.parallel || file.parallel,
            data_out: PathBuf::from(DATA_OUT_FILE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iraplan_core::model::OutputKind;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("iraplan").chain(args.iter().copied())).unwrap()
    }

    fn resolve(args: &[&str]) -> Result<RunOptions, ConfigError> {
        parse(args).resolve(RunConfigFile::default())
    }

    #[test]
    fn test_defaults() {
        let options = resolve(&[]).unwrap();

        assert_eq!(options.config.years, 20);
        assert_eq!(options.config.output, OutputSelect::All);
        assert_eq!(options.config.mode, RunMode::Single);
        assert!(options.config.inputs.fixed_kinds().is_empty());
        assert_eq!(options.data_out, PathBuf::from("data.out"));
    }

    #[test]
    fn test_short_flags() {
        let options = resolve(&[
            "-n", "30", "-c", "0.8", "-S", "1", "-T", "-j", "-o", "out.csv", "--seed", "9",
        ])
        .unwrap();

        assert_eq!(options.config.years, 30);
        assert_eq!(
            options.config.output,
            OutputSelect::Single(OutputKind::FutureValueTaxedWithdrawal)
        );
        assert_eq!(
            *options
                .config
                .inputs
                .get(InputVariableKind::CompoundedAnnualInterestRate),
            InputProfile::Fixed { value: 0.8 }
        );
        assert!(options.time);
        assert!(options.json);
        assert_eq!(options.output, Some(PathBuf::from("out.csv")));
        assert_eq!(options.config.seed, Some(9));
    }

    #[test]
    fn test_multiple_executions_enables_monte_carlo() {
        let options = resolve(&["-M", "1", "-S", "0"]).unwrap();
        assert_eq!(options.config.mode, RunMode::MonteCarlo { iterations: 1 });
    }

    #[test]
    fn test_output_select_out_of_range() {
        assert_eq!(
            resolve(&["-S", "2"]).unwrap_err(),
            ConfigError::OutputSelectOutOfRange { index: 2, max: 1 }
        );
    }

    #[test]
    fn test_all_outputs_with_monte_carlo() {
        assert_eq!(
            resolve(&["-M", "100"]).unwrap_err(),
            ConfigError::AllOutputsNotAllowed {
                mode: "Monte Carlo"
            }
        );
    }

    #[test]
    fn test_all_outputs_with_benchmarking() {
        assert_eq!(
            resolve(&["-b"]).unwrap_err(),
            ConfigError::AllOutputsNotAllowed {
                mode: "benchmarking"
            }
        );
    }

    #[test]
    fn test_zero_iterations() {
        assert_eq!(
            resolve(&["-M", "0", "-S", "0"]).unwrap_err(),
            ConfigError::ZeroIterations
        );
    }

    #[test]
    fn test_negative_years() {
        assert_eq!(
            resolve(&["-n", "-3"]).unwrap_err(),
            ConfigError::NegativeYears(-3)
        );
    }

    #[test]
    fn test_malformed_override() {
        assert!(matches!(
            resolve(&["-w", "forty"]).unwrap_err(),
            ConfigError::Parse {
                kind: InputVariableKind::WithdrawalRate,
                ..
            }
        ));
    }

    #[test]
    fn test_monte_carlo_with_override() {
        assert_eq!(
            resolve(&["-M", "10", "-S", "0", "-t", "5000"]).unwrap_err(),
            ConfigError::MonteCarloWithOverrides(vec![InputVariableKind::TotalAnnualContribution])
        );
    }

    #[test]
    fn test_monte_carlo_with_input_file() {
        assert_eq!(
            resolve(&["-M", "10", "-S", "0", "-i", "inputs.csv"]).unwrap_err(),
            ConfigError::MonteCarloWithFixedSeries
        );
    }

    #[test]
    fn test_checks_run_in_order() {
        // Out-of-range selection wins over every later failure
        assert_eq!(
            resolve(&["-S", "5", "-M", "0", "-n", "-1", "-c", "x"]).unwrap_err(),
            ConfigError::OutputSelectOutOfRange { index: 5, max: 1 }
        );
        // Year count is checked before override parsing
        assert_eq!(
            resolve(&["-n", "-1", "-c", "x"]).unwrap_err(),
            ConfigError::NegativeYears(-1)
        );
    }

    #[test]
    fn test_input_file_ignores_overrides() {
        let options = resolve(&["-i", "inputs.csv", "-c", "0.8"]).unwrap();

        assert_eq!(options.input, Some(PathBuf::from("inputs.csv")));
        assert!(options.config.inputs.fixed_kinds().is_empty());
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = RunConfigFile {
            simulation: SimulationConfig {
                years: 40,
                output: OutputSelect::Single(OutputKind::FutureValueTaxed),
                seed: Some(1),
                ..Default::default()
            },
            json: true,
            ..Default::default()
        };

        let options = parse(&["-n", "10", "--seed", "2"]).resolve(file).unwrap();

        assert_eq!(options.config.years, 10);
        assert_eq!(options.config.seed, Some(2));
        assert_eq!(
            options.config.output,
            OutputSelect::Single(OutputKind::FutureValueTaxed)
        );
        assert!(options.json);
    }
}
