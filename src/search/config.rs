//! Configuration types for the calibration search

use crate::domain::Modulus;
use crate::error::{CalibrationError, Result};
use crate::search::trial::Problem;
use std::time::Duration;

/// Fixed initial arguments of the reference puzzle.
pub const DEFAULT_INITIAL: (u32, u32) = (4, 1);

/// Output the reference puzzle expects.
pub const DEFAULT_TARGET: u32 = 6;

/// Candidates between progress lines from each worker.
pub const DEFAULT_PROGRESS_INTERVAL: u32 = 500;

/// Main search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Domain bound `M`
    pub modulus: Modulus,
    /// First argument of the top-level call
    pub r0: u32,
    /// Second argument of the top-level call
    pub r1: u32,
    /// Value the top-level call must produce
    pub target: u32,
    /// Number of workers (and sub-ranges)
    pub num_workers: usize,
    /// Log a progress line when `r7` is a multiple of this (None = quiet)
    pub progress_interval: Option<u32>,
    /// Overall deadline for the search
    pub timeout: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            modulus: Modulus::default(),
            r0: DEFAULT_INITIAL.0,
            r1: DEFAULT_INITIAL.1,
            target: DEFAULT_TARGET,
            num_workers: num_cpus::get(),
            progress_interval: Some(DEFAULT_PROGRESS_INTERVAL),
            timeout: None,
        }
    }
}

impl SearchConfig {
    pub fn with_modulus(mut self, modulus: Modulus) -> Self {
        self.modulus = modulus;
        self
    }

    /// Set the fixed initial arguments `(r0, r1)`.
    pub fn with_initial(mut self, r0: u32, r1: u32) -> Self {
        self.r0 = r0;
        self.r1 = r1;
        self
    }

    pub fn with_target(mut self, target: u32) -> Self {
        self.target = target;
        self
    }

    /// Set the worker count. Zero is kept as-is and rejected by [`validate`](Self::validate).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    /// Set the progress interval; zero disables progress lines.
    pub fn with_progress_interval(mut self, interval: u32) -> Self {
        self.progress_interval = (interval > 0).then_some(interval);
        self
    }

    pub fn quiet(mut self) -> Self {
        self.progress_interval = None;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_timeout_option(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check worker count, progress interval and argument domains before
    /// anything is launched.
    pub fn validate(&self) -> Result<Problem> {
        if self.num_workers == 0 {
            return Err(CalibrationError::ZeroWorkers);
        }
        if self.progress_interval == Some(0) {
            return Err(CalibrationError::ZeroProgressInterval);
        }
        if self.num_workers > self.modulus.size() {
            return Err(CalibrationError::TooManyWorkers {
                workers: self.num_workers,
                modulus: self.modulus.get(),
            });
        }
        Problem::new(self.modulus, self.r0, self.r1, self.target)
    }
}

impl std::fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "f({}, {}) == {} over r7 in [0, {}) with {} workers",
            self.r0, self.r1, self.target, self.modulus, self.num_workers
        )
    }
}
