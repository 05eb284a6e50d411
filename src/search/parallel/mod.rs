//! Parallel calibration search.
//!
//! # Architecture
//!
//! - A **coordinator** partitions `[0, M)`, spawns one thread per range, and
//!   resolves the first reported solution
//! - **Workers** scan their range in increasing order, one fresh memo table
//!   per candidate
//! - A **channel** carries solutions and final reports from workers to the
//!   coordinator; it is unbounded so late senders never block
//! - A **cancel signal** is raised once (by the first solution, a timeout,
//!   or the caller) and polled by workers between trials
//!
//! When the domain contains several solutions, which one is returned depends
//! on thread scheduling.
//!
//! # Example
//!
//! ```no_run
//! use r7cal::search::{SearchConfig, run_parallel_search};
//!
//! let config = SearchConfig::default().with_workers(8);
//! let result = run_parallel_search(&config)?;
//! println!("{}", result.outcome);
//! # Ok::<(), r7cal::CalibrationError>(())
//! ```

pub mod channel;
pub mod coordinator;

pub use channel::{CancelSignal, WorkerMessage, WorkerReport};
pub use coordinator::{run_parallel_search, run_parallel_search_with_signal};
