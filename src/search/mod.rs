//! Search for the calibration constant `r7`
//!
//! This module provides:
//! - Search configuration and validation
//! - Partitioning of `[0, M)` into per-worker ranges
//! - Single trials and a sequential reference scanner
//! - The parallel coordinator with first-result cancellation

pub mod config;
pub mod parallel;
pub mod partition;
pub mod result;
pub mod trial;

pub use config::{DEFAULT_INITIAL, DEFAULT_PROGRESS_INTERVAL, DEFAULT_TARGET, SearchConfig};
pub use parallel::{CancelSignal, WorkerReport, run_parallel_search, run_parallel_search_with_signal};
pub use partition::{SearchRange, partition, validate_partition};
pub use result::{ParallelResult, SearchOutcome, SearchStatistics};
pub use trial::{Problem, TrialOutcome};
