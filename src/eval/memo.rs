//! Per-trial memo table keyed by `(r0, r1)`.
//!
//! The function depends on `r7` only through its base case, so a table is
//! valid for exactly one `r7`. Callers create a fresh table for every trial.

use crate::domain::{Modulus, Word};

/// Marker for an empty slot. Domain values never reach it since `M <= 2^15`.
const EMPTY: Word = Word::MAX;

/// Mapping from `(r0, r1)` to a previously computed result.
///
/// Stored as one dense row of `M` slots per distinct `r0`, allocated the
/// first time that `r0` is touched. A top-level call at `r0 = n` only ever
/// reaches rows `0..=n`.
#[derive(Debug, Clone)]
pub struct MemoTable {
    modulus: Modulus,
    rows: Vec<Vec<Word>>,
    len: usize,
}

impl MemoTable {
    pub fn new(modulus: Modulus) -> Self {
        Self {
            modulus,
            rows: Vec::new(),
            len: 0,
        }
    }

    pub fn modulus(&self) -> Modulus {
        self.modulus
    }

    /// Look up the cached result for `(r0, r1)`.
    #[inline]
    pub fn get(&self, r0: Word, r1: Word) -> Option<Word> {
        let value = *self.rows.get(r0 as usize)?.get(r1 as usize)?;
        (value != EMPTY).then_some(value)
    }

    /// Store the result for `(r0, r1)`, replacing any previous entry.
    pub fn insert(&mut self, r0: Word, r1: Word, value: Word) {
        debug_assert!(self.modulus.contains(u32::from(value)));
        let row = r0 as usize;
        if row >= self.rows.len() {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let size = self.modulus.size();
        let slots = &mut self.rows[row];
        if slots.is_empty() {
            slots.resize(size, EMPTY);
        }
        let slot = &mut slots[r1 as usize];
        if *slot == EMPTY {
            self.len += 1;
        }
        *slot = value;
    }

    pub fn contains(&self, r0: Word, r1: Word) -> bool {
        self.get(r0, r1).is_some()
    }

    /// Number of distinct pairs stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every entry, keeping allocated rows for reuse.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(EMPTY);
        }
        self.len = 0;
    }
}
