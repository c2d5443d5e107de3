//! Problem implementations for the layered engine.
//!
//! These modules show how to implement [`LayeredProblem`](crate::traits::LayeredProblem)
//! for concrete dynamic programs:
//! - [`hamilton`]    : shortest Hamiltonian path (Held–Karp over subset layers).
//! - [`max_attack`]  : bit-by-bit maximisation through a chain of bitwise gates.

pub mod hamilton;
pub mod max_attack;
