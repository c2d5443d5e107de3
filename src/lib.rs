//! State-compression dynamic programming.
//!
//! This crate solves small combinatorial problems whose state is a set of
//! items packed into the bits of an integer.
//!
//! ## Core idea
//! 1. Model your recurrence as a *layered* DP: layer `k + 1` is computed from
//!    layer `k` alone (for subset DPs, a layer is one subset cardinality).
//! 2. Implement the [`LayeredProblem`] trait for that recurrence.
//! 3. Let [`LayerEngine`] drive the forward pass and the reconstruction to
//!    obtain the optimal cost *and* an explicit sequence of states.
//!
//! When only the cost is needed, the engine keeps a single live layer, so a
//! subset DP over `n` items holds `O(C(n, n/2))` rows instead of `O(2^n)`.
//!
//! ## Quick start
//! ```
//! use bitmask_dp::problems::hamilton::solve;
//!
//! let weights = vec![vec![0, 10, 100], vec![10, 0, 10], vec![100, 10, 0]];
//! assert_eq!(solve(3, &weights), Ok(20));
//! ```
//!
//! ## Built-in problems
//! The `problems` module contains:
//! - Shortest Hamiltonian path from node 0 to node `n - 1` (Held–Karp)
//! - Maximum output of a bitwise gate chain under an input budget
//!
//! Alongside them: [`BitState`], a one-word mutable bit set, and
//! [`utils::fast_power`] for modular exponentiation.

pub mod bitstate;
pub mod builder;
pub mod engine;
pub mod error;
pub mod problems;
pub mod subsets;
pub mod traits;
pub mod utils;

pub use crate::bitstate::BitState;
pub use crate::builder::LayerEngineBuilder;
pub use crate::engine::LayerEngine;
pub use crate::error::{Cancelled, InvalidInput};
pub use crate::traits::LayeredProblem;
