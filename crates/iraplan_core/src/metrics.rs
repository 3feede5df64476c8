//! Run metrics for timing and benchmarking
//!
//! The driver records how many iterations ran, how many values were drawn
//! from the random source, and the elapsed time of sampling, valuation and
//! aggregation. Benchmark harnesses read the elapsed microseconds.

use std::time::{Duration, Instant};

/// Metrics collected during one driver call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    /// Kernel evaluations performed
    pub iterations: u64,
    /// Values drawn from the random source
    pub random_draws: u64,
    /// Wall time spent in the driver
    pub elapsed: Duration,
}

impl RunMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one kernel evaluation that consumed `draws` random values
    pub fn record_iteration(&mut self, draws: u64) {
        self.iterations += 1;
        self.random_draws += draws;
    }

    /// Elapsed time in whole microseconds, as reported in benchmark output
    #[must_use]
    pub fn elapsed_micros(&self) -> u64 {
        u64::try_from(self.elapsed.as_micros()).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Fold another batch's counts into this one. Elapsed time is not summed.
    pub fn merge_counts(&mut self, other: &RunMetrics) {
        self.iterations += other.iterations;
        self.random_draws += other.random_draws;
    }
}

/// Monotonic stopwatch started at construction
#[derive(Debug, Clone, Copy)]
pub struct RunTimer {
    start: Instant,
}

impl RunTimer {
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Store the time since [`RunTimer::start`] in `metrics`
    pub fn stop(self, metrics: &mut RunMetrics) {
        metrics.elapsed = self.start.elapsed();
    }
}
