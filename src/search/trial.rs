//! A single calibration trial and the sequential reference scanner.

use crate::domain::{Modulus, Word};
use crate::error::Result;
use crate::eval::{EvalStats, Evaluator, MemoTable};
use crate::search::partition::SearchRange;
use log::warn;

/// The fixed part of a calibration search: domain, initial arguments, target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub modulus: Modulus,
    pub r0: Word,
    pub r1: Word,
    /// Kept as `u32`; a target outside `[0, M)` can never match.
    pub target: u32,
}

/// What one trial produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    pub r7: Word,
    pub value: Word,
    pub matched: bool,
    pub stats: EvalStats,
}

impl Problem {
    pub fn new(modulus: Modulus, r0: u32, r1: u32, target: u32) -> Result<Self> {
        let r0 = modulus.word("r0", r0)?;
        let r1 = modulus.word("r1", r1)?;
        if !modulus.contains(target) {
            warn!(
                "target {} lies outside [0, {}) and can never be produced",
                target, modulus
            );
        }
        Ok(Self {
            modulus,
            r0,
            r1,
            target,
        })
    }

    /// Evaluate the top-level call for `r7` with a fresh memo table.
    pub fn run_trial(&self, r7: Word) -> TrialOutcome {
        let mut memo = MemoTable::new(self.modulus);
        self.run_trial_in(&mut memo, r7)
    }

    /// Like [`run_trial`](Self::run_trial), but reuses `memo`'s allocation.
    /// The table is cleared first, so nothing carries over from another `r7`.
    pub fn run_trial_in(&self, memo: &mut MemoTable, r7: Word) -> TrialOutcome {
        memo.clear();
        let mut evaluator = Evaluator::new(r7);
        let value = evaluator.evaluate(memo, self.r0, self.r1);
        TrialOutcome {
            r7,
            value,
            matched: u32::from(value) == self.target,
            stats: evaluator.stats(),
        }
    }

    pub fn is_solution(&self, r7: Word) -> bool {
        self.run_trial(r7).matched
    }

    /// Scan `range` in increasing order on the current thread and return the
    /// first solution. Used as the slow reference for the parallel search.
    pub fn scan_range(&self, range: SearchRange) -> Option<Word> {
        range.iter().find(|&r7| self.is_solution(r7))
    }

    /// Every solution in `range`, in increasing order.
    pub fn solutions_in(&self, range: SearchRange) -> Vec<Word> {
        range.iter().filter(|&r7| self.is_solution(r7)).collect()
    }
}
