//! Unmemoized reference evaluator.
//!
//! Direct recursion over the definition, with a call budget since the call
//! count explodes for `r0 >= 3`. Only meant for cross-checking the
//! memoized evaluator on small inputs.

use crate::domain::{Modulus, Word};

/// Evaluate `f(r0, r1)` for `r7` without memoization.
///
/// Returns `None` once more than `budget` calls have been made.
pub fn evaluate_naive(modulus: Modulus, r0: Word, r1: Word, r7: Word, budget: u64) -> Option<Word> {
    let mut remaining = budget;
    recurse(modulus, r0, r1, r7, &mut remaining)
}

fn recurse(m: Modulus, r0: Word, r1: Word, r7: Word, remaining: &mut u64) -> Option<Word> {
    *remaining = remaining.checked_sub(1)?;
    if r0 == 0 {
        return Some(m.inc(r1));
    }
    if r1 == 0 {
        return recurse(m, m.dec(r0), r7, r7, remaining);
    }
    let inner = recurse(m, r0, m.dec(r1), r7, remaining)?;
    recurse(m, m.dec(r0), inner, r7, remaining)
}
