//! Error types for calibration searches

use thiserror::Error;

/// Errors that abort a calibration search before or while it runs.
///
/// Exhausting the domain without a match is not an error; see
/// [`SearchOutcome::NotFound`](crate::search::SearchOutcome::NotFound).
#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("worker count must be at least 1")]
    ZeroWorkers,

    #[error("{workers} workers requested for a domain of only {modulus} values")]
    TooManyWorkers { workers: usize, modulus: u32 },

    #[error("progress interval must be at least 1 (use None to disable progress lines)")]
    ZeroProgressInterval,

    #[error("modulus {0} is outside the supported range 1..=32768")]
    InvalidModulus(u32),

    #[error("{name} = {value} is outside the domain [0, {modulus})")]
    ArgumentOutOfDomain {
        name: &'static str,
        value: u32,
        modulus: u32,
    },

    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    #[error("worker {0} panicked")]
    WorkerPanicked(usize),
}

pub type Result<T> = std::result::Result<T, CalibrationError>;
