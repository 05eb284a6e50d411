//! Parallel calibration search for the eighth register of a memoized,
//! modular, three-argument recursive function.
//!
//! The [`eval`] module evaluates the function for one `r7`; the [`search`]
//! module scans the whole `r7` domain across worker threads and stops as
//! soon as one of them finds a value that produces the target output.

pub mod domain;
pub mod error;
pub mod eval;
pub mod search;

pub use domain::{DEFAULT_MODULUS, MAX_MODULUS, Modulus, Word};
pub use error::{CalibrationError, Result};
