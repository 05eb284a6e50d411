//! Partitioning of the candidate domain into per-worker ranges.

use crate::domain::{Modulus, Word};
use crate::error::{CalibrationError, Result};

/// Half-open range `[start, end)` of candidate `r7` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchRange {
    pub start: u32,
    pub end: u32,
}

impl SearchRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.start..self.end).contains(&value)
    }

    /// Candidates in increasing order.
    ///
    /// Ranges come from [`partition`], which keeps `end <= 2^15`, so every
    /// value fits in a [`Word`].
    pub fn iter(&self) -> impl Iterator<Item = Word> + use<> {
        (self.start..self.end).map(|r7| r7 as Word)
    }
}

impl std::fmt::Display for SearchRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Split `[0, M)` into `workers` contiguous ranges.
///
/// With `M = q * workers + rem`, the first `rem` ranges hold `q + 1` values
/// and the rest hold `q`.
pub fn partition(modulus: Modulus, workers: usize) -> Result<Vec<SearchRange>> {
    if workers == 0 {
        return Err(CalibrationError::ZeroWorkers);
    }
    let m = modulus.get();
    if workers > modulus.size() {
        return Err(CalibrationError::TooManyWorkers {
            workers,
            modulus: m,
        });
    }

    let k = workers as u32;
    let (base, rem) = (m / k, m % k);
    let ranges: Vec<_> = (0..k)
        .map(|i| {
            let start = i * base + i.min(rem);
            let len = base + u32::from(i < rem);
            SearchRange::new(start, start + len)
        })
        .collect();

    validate_partition(&ranges, modulus)?;
    Ok(ranges)
}

/// Check that `ranges` cover `[0, M)` exactly once, in order, with no empty range.
pub fn validate_partition(ranges: &[SearchRange], modulus: Modulus) -> Result<()> {
    if ranges.is_empty() {
        return Err(CalibrationError::ZeroWorkers);
    }

    let mut expected = 0;
    for (i, range) in ranges.iter().enumerate() {
        if range.is_empty() {
            return Err(CalibrationError::InvalidPartition(format!(
                "range {} {} is empty",
                i, range
            )));
        }
        if range.start > expected {
            return Err(CalibrationError::InvalidPartition(format!(
                "gap [{}, {}) before range {}",
                expected, range.start, i
            )));
        }
        if range.start < expected {
            return Err(CalibrationError::InvalidPartition(format!(
                "range {} {} overlaps values below {}",
                i, range, expected
            )));
        }
        expected = range.end;
    }

    match expected.cmp(&modulus.get()) {
        std::cmp::Ordering::Equal => Ok(()),
        std::cmp::Ordering::Less => Err(CalibrationError::InvalidPartition(format!(
            "values [{}, {}) are not covered",
            expected, modulus
        ))),
        std::cmp::Ordering::Greater => Err(CalibrationError::InvalidPartition(format!(
            "ranges extend to {} beyond the domain bound {}",
            expected, modulus
        ))),
    }
}
