//! Memoized evaluator for the three-argument modular recursion.
//!
//! ```text
//! f(0,  r1) = r1 + 1
//! f(r0, 0 ) = f(r0 - 1, r7)
//! f(r0, r1) = f(r0 - 1, f(r0, r1 - 1))
//! ```
//!
//! Every arithmetic step is reduced modulo `M`. The recursion is simulated
//! on a heap-allocated work stack so a fresh trial can nest tens of
//! thousands of levels deep without touching the thread's call stack.

use crate::domain::{Modulus, Word};
use crate::eval::memo::MemoTable;

/// A pending unit of work on the evaluation stack.
#[derive(Debug, Clone, Copy)]
enum Frame {
    /// Produce `f(r0, r1)` into the return register.
    Eval { r0: Word, r1: Word },
    /// The return register holds `f(r0, r1 - 1)`; continue with the outer call.
    Outer { r0: Word, r1: Word },
    /// The return register holds `f(r0, r1)`; record it.
    Store { r0: Word, r1: Word },
}

/// Call-count instrumentation for one evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Pairs computed from scratch (memo misses).
    pub pairs_computed: u64,
    /// Lookups answered by the memo table.
    pub memo_hits: u64,
    /// Deepest work stack observed.
    pub max_depth: usize,
}

impl EvalStats {
    /// Total number of `(r0, r1)` visits, i.e. the calls a recursive
    /// implementation would have made.
    pub fn calls(&self) -> u64 {
        self.pairs_computed + self.memo_hits
    }

    pub fn merge(&mut self, other: &EvalStats) {
        self.pairs_computed += other.pairs_computed;
        self.memo_hits += other.memo_hits;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// Evaluates `f(r0, r1)` for one fixed `r7`.
///
/// The memo table is passed in by the caller and is the only state the
/// evaluator mutates besides its own scratch stack and counters. It must
/// not be shared between evaluators with different `r7` values.
#[derive(Debug)]
pub struct Evaluator {
    r7: Word,
    stack: Vec<Frame>,
    stats: EvalStats,
}

impl Evaluator {
    pub fn new(r7: Word) -> Self {
        Self {
            r7,
            stack: Vec::new(),
            stats: EvalStats::default(),
        }
    }

    pub fn r7(&self) -> Word {
        self.r7
    }

    pub fn stats(&self) -> EvalStats {
        self.stats
    }

    /// Evaluate `f(r0, r1)`, consulting and filling `memo`.
    ///
    /// `r0` and `r1` must already lie in the memo table's domain.
    pub fn evaluate(&mut self, memo: &mut MemoTable, r0: Word, r1: Word) -> Word {
        let m = memo.modulus();
        debug_assert!(m.contains(u32::from(r0)) && m.contains(u32::from(r1)));

        self.stack.clear();
        self.stack.push(Frame::Eval { r0, r1 });
        let mut ret: Word = 0;

        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Eval { r0, r1 } => {
                    if let Some(cached) = memo.get(r0, r1) {
                        self.stats.memo_hits += 1;
                        ret = cached;
                        continue;
                    }
                    self.stats.pairs_computed += 1;

                    if r0 == 0 {
                        ret = m.inc(r1);
                        memo.insert(r0, r1, ret);
                    } else if r1 == 0 {
                        self.stack.push(Frame::Store { r0, r1 });
                        self.stack.push(Frame::Eval {
                            r0: m.dec(r0),
                            r1: self.r7,
                        });
                    } else {
                        self.stack.push(Frame::Outer { r0, r1 });
                        self.stack.push(Frame::Eval { r0, r1: m.dec(r1) });
                    }
                    self.stats.max_depth = self.stats.max_depth.max(self.stack.len());
                }
                Frame::Outer { r0, r1 } => {
                    self.stack.push(Frame::Store { r0, r1 });
                    self.stack.push(Frame::Eval {
                        r0: m.dec(r0),
                        r1: ret,
                    });
                }
                Frame::Store { r0, r1 } => memo.insert(r0, r1, ret),
            }
        }

        ret
    }
}

/// Evaluate `f(r0, r1)` for `r7` with a fresh memo table.
pub fn evaluate_fresh(modulus: Modulus, r0: Word, r1: Word, r7: Word) -> Word {
    let mut memo = MemoTable::new(modulus);
    Evaluator::new(r7).evaluate(&mut memo, r0, r1)
}
