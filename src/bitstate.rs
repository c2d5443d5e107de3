//! A single-word bit set for state compression.
//!
//! Bit `k` of the underlying `u64` records whether item `k` is in the set.
//! Mutating operations take `&mut self` and change the caller's value in
//! place; queries take `&self`.

use std::fmt;

/// Compressed boolean state over positions `0..64`.
///
/// ```
/// use bitmask_dp::BitState;
///
/// let mut state = BitState::from_bools(&[true, false, true, true]);
/// assert_eq!(state.bits(), 13);
/// assert!(state.get(2));
/// state.toggle(0);
/// assert_eq!(state.count_ones(), 2);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitState(u64);

impl BitState {
    /// Number of addressable positions.
    pub const CAPACITY: usize = u64::BITS as usize;

    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a state where position `i` is set iff `flags[i]`.
    ///
    /// # Panics
    /// Panics if `flags` is longer than [`Self::CAPACITY`].
    pub fn from_bools(flags: &[bool]) -> Self {
        assert!(
            flags.len() <= Self::CAPACITY,
            "{} flags do not fit in a {}-bit state",
            flags.len(),
            Self::CAPACITY
        );
        flags.iter().copied().collect()
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    fn mask(k: usize) -> u64 {
        assert!(k < Self::CAPACITY, "bit {k} out of range");
        1u64 << k
    }

    #[inline]
    pub fn get(&self, k: usize) -> bool {
        self.0 & Self::mask(k) != 0
    }

    #[inline]
    pub fn set(&mut self, k: usize) {
        self.0 |= Self::mask(k);
    }

    #[inline]
    pub fn clear(&mut self, k: usize) {
        self.0 &= !Self::mask(k);
    }

    #[inline]
    pub fn toggle(&mut self, k: usize) {
        self.0 ^= Self::mask(k);
    }

    /// Set or clear bit `k`, returning its previous value.
    pub fn assign(&mut self, k: usize, value: bool) -> bool {
        let prev = self.get(k);
        if value {
            self.set(k);
        } else {
            self.clear(k);
        }
        prev
    }

    /// Number of set positions (the size of the compressed subset).
    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate set positions in increasing order.
    pub fn iter_ones(&self) -> Ones {
        Ones { rest: self.0 }
    }
}

impl From<u64> for BitState {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<u32> for BitState {
    fn from(bits: u32) -> Self {
        Self(u64::from(bits))
    }
}

impl From<BitState> for u64 {
    fn from(state: BitState) -> Self {
        state.0
    }
}

impl FromIterator<bool> for BitState {
    /// # Panics
    /// Panics if the iterator yields more than [`BitState::CAPACITY`] items.
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut state = Self::empty();
        for (k, flag) in iter.into_iter().enumerate() {
            if flag {
                state.set(k);
            } else {
                // Still range-checks k.
                state.clear(k);
            }
        }
        state
    }
}

impl fmt::Debug for BitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitState({:#b})", self.0)
    }
}

impl fmt::Binary for BitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

/// Iterator over the set positions of a [`BitState`], lowest first.
#[derive(Clone, Debug)]
pub struct Ones {
    rest: u64,
}

impl Iterator for Ones {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.rest == 0 {
            return None;
        }
        let k = self.rest.trailing_zeros() as usize;
        // drop lowest set bit
        self.rest &= self.rest - 1;
        Some(k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rest.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Ones {}
