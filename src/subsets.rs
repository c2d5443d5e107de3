//! Dense indexing of fixed-size subsets.
//!
//! A layer of a subset DP holds every `k`-subset of a small universe. Listing
//! them in increasing numeric order is the same as colexicographic order, and
//! the colex rank of a subset is a dense index in `0..C(universe, k)`. That
//! lets a layer be one flat `Vec` instead of a `2^universe` table.

use crate::utils::binomial_table;

/// Largest universe whose subsets fit in a `u32` mask.
pub const MAX_UNIVERSE: usize = 31;

/// Ranks and enumerates the `k`-subsets of `{0, .., universe - 1}`.
#[derive(Clone, Debug)]
pub struct SubsetIndexer {
    universe: usize,
    binom: Vec<Vec<usize>>,
}

impl SubsetIndexer {
    /// # Panics
    /// Panics if `universe > MAX_UNIVERSE`.
    pub fn new(universe: usize) -> Self {
        assert!(
            universe <= MAX_UNIVERSE,
            "universe of {universe} items does not fit a u32 mask"
        );
        Self {
            universe,
            binom: binomial_table(universe),
        }
    }

    #[inline]
    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Number of `k`-subsets, `C(universe, k)`; zero when `k > universe`.
    #[inline]
    pub fn count(&self, k: usize) -> usize {
        if k > self.universe {
            0
        } else {
            self.binom[self.universe][k]
        }
    }

    /// Colex rank of `mask` among subsets of the same size.
    ///
    /// The `t`-th lowest member `b` (counting from 1) contributes `C(b, t)`.
    #[inline]
    pub fn rank(&self, mask: u32) -> usize {
        debug_assert!(
            u64::from(mask) < 1u64 << self.universe,
            "mask {mask:#b} outside universe of {}",
            self.universe
        );
        let mut rank = 0;
        let mut rest = mask;
        let mut t = 1;
        while rest != 0 {
            let b = rest.trailing_zeros() as usize;
            if t <= b {
                rank += self.binom[b][t];
            }
            rest &= rest - 1;
            t += 1;
        }
        rank
    }

    /// Iterate the `k`-subsets in increasing numeric (= rank) order.
    pub fn iter(&self, k: usize) -> KSubsets {
        let limit = 1u64 << self.universe;
        let next = if k > self.universe {
            None
        } else {
            Some((1u64 << k) - 1)
        };
        KSubsets { next, limit }
    }
}

/// Gosper's-hack enumeration of equal-size subsets.
#[derive(Clone, Debug)]
pub struct KSubsets {
    next: Option<u64>,
    limit: u64,
}

impl Iterator for KSubsets {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let x = self.next?;
        self.next = if x == 0 {
            None
        } else {
            let c = x & x.wrapping_neg();
            let r = x + c;
            let succ = (((r ^ x) >> 2) / c) | r;
            (succ < self.limit).then_some(succ)
        };
        // x < limit <= 2^31
        Some(x as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_all_k_subsets_in_order() {
        let idx = SubsetIndexer::new(5);
        for k in 0..=5 {
            let listed: Vec<u32> = idx.iter(k).collect();
            let expected: Vec<u32> = (0u32..32).filter(|m| m.count_ones() as usize == k).collect();
            assert_eq!(listed, expected, "k={k}");
            assert_eq!(listed.len(), idx.count(k));
        }
    }

    #[test]
    fn rank_is_position_in_enumeration() {
        let idx = SubsetIndexer::new(7);
        for k in 0..=7 {
            for (pos, mask) in idx.iter(k).enumerate() {
                assert_eq!(idx.rank(mask), pos, "mask={mask:#b}");
            }
        }
    }

    #[test]
    fn oversized_k_is_empty() {
        let idx = SubsetIndexer::new(3);
        assert_eq!(idx.iter(4).count(), 0);
        assert_eq!(idx.count(4), 0);
    }

    #[test]
    fn empty_universe_has_only_the_empty_set() {
        let idx = SubsetIndexer::new(0);
        assert_eq!(idx.universe(), 0);
        assert_eq!(idx.iter(0).collect::<Vec<_>>(), vec![0]);
        assert_eq!(idx.rank(0), 0);
    }
}
