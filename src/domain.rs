//! The modular value domain shared by every argument and result.
//!
//! All values live in `[0, M)` with `M <= 32768`, so they fit in a `u16`
//! and the top bit is never set. Arithmetic wraps immediately after each
//! step: decrementing zero yields `M - 1`, incrementing `M - 1` yields zero.

use crate::error::{CalibrationError, Result};

/// A single value of the domain.
pub type Word = u16;

/// Domain bound of the reference puzzle.
pub const DEFAULT_MODULUS: u32 = 32768;

/// Largest supported bound (15-bit values).
pub const MAX_MODULUS: u32 = 1 << 15;

/// The modular domain bound `M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modulus(u32);

impl Modulus {
    /// Create a domain bound, rejecting zero and anything above [`MAX_MODULUS`].
    pub fn new(value: u32) -> Result<Self> {
        if value == 0 || value > MAX_MODULUS {
            return Err(CalibrationError::InvalidModulus(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of values in the domain.
    pub fn size(self) -> usize {
        self.0 as usize
    }

    /// `(x + 1) mod M`
    #[inline]
    pub fn inc(self, x: Word) -> Word {
        ((u32::from(x) + 1) % self.0) as Word
    }

    /// `(x - 1) mod M`, wrapping zero to `M - 1`.
    #[inline]
    pub fn dec(self, x: Word) -> Word {
        ((u32::from(x) + self.0 - 1) % self.0) as Word
    }

    pub fn contains(self, value: u32) -> bool {
        value < self.0
    }

    /// Convert a caller-supplied argument into a domain word.
    pub fn word(self, name: &'static str, value: u32) -> Result<Word> {
        if !self.contains(value) {
            return Err(CalibrationError::ArgumentOutOfDomain {
                name,
                value,
                modulus: self.0,
            });
        }
        Ok(value as Word)
    }
}

impl Default for Modulus {
    fn default() -> Self {
        Self(DEFAULT_MODULUS)
    }
}

impl std::fmt::Display for Modulus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulus_bounds() {
        assert!(Modulus::new(0).is_err());
        assert!(Modulus::new(MAX_MODULUS + 1).is_err());
        assert_eq!(Modulus::new(1).unwrap().get(), 1);
        assert_eq!(Modulus::new(MAX_MODULUS).unwrap().get(), 32768);
        assert_eq!(Modulus::default().get(), DEFAULT_MODULUS);
    }

    #[test]
    fn test_inc_wraps() {
        let m = Modulus::default();
        assert_eq!(m.inc(0), 1);
        assert_eq!(m.inc(32766), 32767);
        assert_eq!(m.inc(32767), 0);

        let small = Modulus::new(10).unwrap();
        assert_eq!(small.inc(9), 0);
    }

    #[test]
    fn test_dec_wraps() {
        let m = Modulus::default();
        assert_eq!(m.dec(1), 0);
        assert_eq!(m.dec(0), 32767);

        let small = Modulus::new(10).unwrap();
        assert_eq!(small.dec(0), 9);
        assert_eq!(small.dec(5), 4);

        // A single-value domain maps everything to zero.
        let unit = Modulus::new(1).unwrap();
        assert_eq!(unit.dec(0), 0);
        assert_eq!(unit.inc(0), 0);
    }

    #[test]
    fn test_word_checks_domain() {
        let m = Modulus::new(10).unwrap();
        assert_eq!(m.word("r0", 9).unwrap(), 9);
        match m.word("r0", 10) {
            Err(CalibrationError::ArgumentOutOfDomain { name, value, modulus }) => {
                assert_eq!(name, "r0");
                assert_eq!(value, 10);
                assert_eq!(modulus, 10);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
