//! Evaluation of the calibration function
//!
//! This module provides:
//! - A per-trial memo table keyed by `(r0, r1)`
//! - The memoized evaluator, driven by an explicit work stack
//! - An unmemoized reference evaluator for cross-checking small inputs

pub mod evaluator;
pub mod memo;
pub mod naive;

pub use evaluator::{EvalStats, Evaluator, evaluate_fresh};
pub use memo::MemoTable;
pub use naive::evaluate_naive;
