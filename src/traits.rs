//! Core trait definitions for layered dynamic programs.
//!
//! To run a DP on [`LayerEngine`](crate::engine::LayerEngine), implement
//! [`LayeredProblem`] for a struct that captures one instance (a weight
//! matrix, a gate chain, ...).
//!
//! The trait encodes a small contract:
//! - Layered structure: layers 0..=T, with transitions between consecutive layers.
//! - Frontiers: every DP value of one layer, computed only from the layer before.
//! - Objective: read off the final frontier.
//! - Reconstruction: walk the stored frontiers backwards to recover one optimal
//!   sequence of states.
//!
//! For subset DPs a "layer" is a subset cardinality: every subset of size
//! `k + 1` depends only on subsets of size `k`, so the engine can drop a
//! frontier as soon as the next one is built.

/// Trait for a layered dynamic program instance.
///
/// Semantics:
/// - There are `T = num_layers()` steps.
/// - `init_frontier()` is the frontier at layer 0.
/// - `forward_step(i, frontier)` maps layer `i` -> layer `i+1`.
/// - After T steps, `extract_cost` reads the objective from layer T.
pub trait LayeredProblem {
    /// A single state along the reconstructed optimal sequence.
    /// For the Hamiltonian path solver, a node index.
    type State: Clone + PartialEq;

    /// All DP values on one layer.
    type Frontier: Clone;

    /// Objective / cost type.
    ///
    /// Must support ordering so callers can compare solutions.
    type Cost: Copy + Ord;

    /// Number of DP layers/steps `T`.
    fn num_layers(&self) -> usize;

    /// Initialize the frontier at layer 0.
    fn init_frontier(&self) -> Self::Frontier;

    /// Perform one DP step: from layer `layer` to `layer + 1`.
    ///
    /// Must only depend on `frontier` and fixed problem data.
    fn forward_step(&self, layer: usize, frontier: &Self::Frontier) -> Self::Frontier;

    /// Extract the objective value from the final frontier.
    fn extract_cost(&self, frontier_t: &Self::Frontier) -> Self::Cost;

    /// Reconstruct one optimal sequence of states.
    ///
    /// `frontiers` holds every layer `0..=T`, in order. Implementations may
    /// return an empty vector when the objective is infeasible.
    fn reconstruct(&self, frontiers: &[Self::Frontier]) -> Vec<Self::State>;
}
