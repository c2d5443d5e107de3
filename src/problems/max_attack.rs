//! "Max attack under budget": pick an initial value `x <= budget` that comes
//! out of a chain of bitwise gates as large as possible.
//!
//! Each gate (`AND t`, `OR t`, `XOR t`) acts on every bit independently, so
//! output bit `b` depends only on input bit `b`. Running the chain once on
//! all-zeros and once on all-ones therefore tells, for every bit, what a `0`
//! or a `1` turns into. Deciding bits from the most significant one down is a
//! layered problem with one layer per bit:
//!
//! - keep a `0` if it already comes out as `1`;
//! - otherwise take a `1` if that comes out as `1` and the prefix (with all
//!   lower bits zero) still fits the budget;
//! - otherwise keep a `0`.
//!
//! Higher output bits dominate lower ones, and choosing `0` never tightens the
//! budget, so the result is optimal and the chosen `x` is the smallest
//! maximizer.

use std::str::FromStr;

use thiserror::Error;

use crate::traits::LayeredProblem;
use crate::LayerEngine;

const BITS: usize = u32::BITS as usize;

/// One bitwise gate of the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    And(u32),
    Or(u32),
    Xor(u32),
}

impl Gate {
    #[inline]
    pub fn apply(self, x: u32) -> u32 {
        match self {
            Gate::And(t) => x & t,
            Gate::Or(t) => x | t,
            Gate::Xor(t) => x ^ t,
        }
    }
}

/// Pass `x` through every gate in order.
pub fn run_chain(gates: &[Gate], x: u32) -> u32 {
    gates.iter().fold(x, |acc, gate| gate.apply(acc))
}

/// Error parsing a gate written as `"AND 5"`, `"OR 6"` or `"XOR 7"`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid gate '{0}'")]
pub struct ParseGateError(String);

impl FromStr for Gate {
    type Err = ParseGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseGateError(s.to_string());
        let mut parts = s.split_whitespace();
        let (Some(op), Some(arg), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(err());
        };
        let t = arg.parse::<u32>().map_err(|_| err())?;
        match op.to_ascii_uppercase().as_str() {
            "AND" => Ok(Gate::And(t)),
            "OR" => Ok(Gate::Or(t)),
            "XOR" => Ok(Gate::Xor(t)),
            _ => Err(err()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MaxAttackProblem<'a> {
    pub gates: &'a [Gate],
    pub budget: u32,
    /// chain output for all-zero input
    zeros_out: u32,
    /// chain output for all-one input
    ones_out: u32,
}

/// Decided high bits so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackPrefix {
    pub initial: u32,
    pub attack: u32,
}

/// One decision along the reconstructed path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitChoice {
    /// Bit position, 31 down to 0.
    pub bit: u32,
    /// Whether the initial value has this bit set.
    pub chosen: bool,
    /// Whether the final value has this bit set.
    pub yields: bool,
}

impl<'a> MaxAttackProblem<'a> {
    pub fn new(gates: &'a [Gate], budget: u32) -> Self {
        Self {
            gates,
            budget,
            zeros_out: run_chain(gates, 0),
            ones_out: run_chain(gates, u32::MAX),
        }
    }

    #[inline]
    fn bit_of_layer(layer: usize) -> u32 {
        (BITS - 1 - layer) as u32
    }
}

impl<'a> LayeredProblem for MaxAttackProblem<'a> {
    type State = BitChoice;
    type Frontier = AttackPrefix;
    type Cost = u32;

    fn num_layers(&self) -> usize {
        BITS
    }

    fn init_frontier(&self) -> Self::Frontier {
        AttackPrefix::default()
    }

    fn forward_step(&self, layer: usize, prefix: &Self::Frontier) -> Self::Frontier {
        let bit = 1u32 << Self::bit_of_layer(layer);
        let mut next = *prefix;
        if self.zeros_out & bit != 0 {
            next.attack |= bit;
        } else if self.ones_out & bit != 0 && prefix.initial | bit <= self.budget {
            next.initial |= bit;
            next.attack |= bit;
        }
        next
    }

    fn extract_cost(&self, frontier_t: &Self::Frontier) -> Self::Cost {
        frontier_t.attack
    }

    fn reconstruct(&self, frontiers: &[Self::Frontier]) -> Vec<Self::State> {
        frontiers
            .windows(2)
            .enumerate()
            .map(|(layer, pair)| {
                let bit = Self::bit_of_layer(layer);
                let mask = 1u32 << bit;
                BitChoice {
                    bit,
                    chosen: pair[1].initial & mask != 0,
                    yields: pair[1].attack & mask != 0,
                }
            })
            .collect()
    }
}

/// Best `(initial, final)` pair with `initial <= budget`.
///
/// ```
/// use bitmask_dp::problems::max_attack::{max_attack, Gate};
///
/// let gates = [Gate::And(5), Gate::Or(6), Gate::Xor(7)];
/// assert_eq!(max_attack(&gates, 10), (0, 1));
/// ```
pub fn max_attack(gates: &[Gate], budget: u32) -> (u32, u32) {
    let (attack, choices) = LayerEngine::new(MaxAttackProblem::new(gates, budget)).run();
    let initial = choices
        .iter()
        .filter(|c| c.chosen)
        .fold(0u32, |acc, c| acc | 1 << c.bit);
    debug_assert_eq!(run_chain(gates, initial), attack);
    (initial, attack)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(gates: &[Gate], budget: u32) -> (u32, u32) {
        let mut best = (0, run_chain(gates, 0));
        for x in 1..=budget {
            let out = run_chain(gates, x);
            if out > best.1 {
                best = (x, out);
            }
        }
        best
    }

    #[test]
    fn classic_sample() {
        // AND 5, OR 6, XOR 7 with m = 10: best output is 1.
        let gates = [Gate::And(5), Gate::Or(6), Gate::Xor(7)];
        assert_eq!(max_attack(&gates, 10), brute_force(&gates, 10));
        assert_eq!(max_attack(&gates, 10).1, 1);
    }

    #[test]
    fn empty_chain_returns_budget() {
        assert_eq!(max_attack(&[], 37), (37, 37));
        assert_eq!(max_attack(&[], u32::MAX), (u32::MAX, u32::MAX));
        assert_eq!(max_attack(&[], 0), (0, 0));
    }

    #[test]
    fn xor_all_prefers_zero() {
        let gates = [Gate::Xor(u32::MAX)];
        assert_eq!(max_attack(&gates, 1000), (0, u32::MAX));
    }

    #[test]
    fn path_has_one_choice_per_bit() {
        let gates = [Gate::Or(1)];
        let (attack, path) = LayerEngine::new(MaxAttackProblem::new(&gates, 6)).run();
        assert_eq!(attack, 7);
        assert_eq!(path.len(), 32);
        assert_eq!(path[0].bit, 31);
        assert_eq!(path[31].bit, 0);
        // bit 0 already comes out as 1 from the OR gate
        assert!(!path[31].chosen && path[31].yields);
    }

    #[test]
    fn parse_gates() {
        assert_eq!("AND 5".parse::<Gate>(), Ok(Gate::And(5)));
        assert_eq!("or 6".parse::<Gate>(), Ok(Gate::Or(6)));
        assert_eq!(" XOR   7 ".parse::<Gate>(), Ok(Gate::Xor(7)));
        assert!("NAND 1".parse::<Gate>().is_err());
        assert!("AND".parse::<Gate>().is_err());
        assert!("AND 1 2".parse::<Gate>().is_err());
        assert!("AND -1".parse::<Gate>().is_err());
    }
}
