//! Generic layered DP engine.
//!
//! This module implements the two-phase algorithm:
//! 1. A forward pass that builds the frontier of every layer from the one
//!    before it.
//! 2. A reconstruction that hands the stored frontiers back to the problem
//!    to recover an optimal sequence of states.
//!
//! When only the objective is needed ([`LayerEngine::run_cost`]) the forward
//! pass keeps a single live frontier, so peak memory is two adjacent layers
//! rather than the whole table.
//!
//! The engine is completely generic over implementations of [`LayeredProblem`].

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Cancelled;
use crate::traits::LayeredProblem;

/// Layered DP engine for a given problem instance `P`.
///
/// Typical usage:
/// ```
/// use bitmask_dp::{problems::hamilton::{HamiltonProblem, WeightMatrix}, LayerEngine};
///
/// let weights = WeightMatrix::from_rows(&[
///     vec![0, 10, 100],
///     vec![10, 0, 10],
///     vec![100, 10, 0],
/// ])
/// .unwrap();
/// let engine = LayerEngine::new(HamiltonProblem::new(&weights));
/// let (cost, path) = engine.run();
/// assert_eq!(cost, 20);
/// assert_eq!(path, vec![0, 1, 2]);
/// ```
pub struct LayerEngine<P: LayeredProblem> {
    problem: P,
    cancel: Option<Arc<AtomicBool>>,
}

impl<P: LayeredProblem> LayerEngine<P> {
    /// Create a new engine without a cancellation flag.
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            cancel: None,
        }
    }

    /// Create a new engine polling `cancel` between layers in the `try_*` runs.
    pub fn with_cancel_flag(problem: P, cancel: Arc<AtomicBool>) -> Self {
        Self {
            problem,
            cancel: Some(cancel),
        }
    }

    /// Expose immutable reference to the underlying problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Expose mutable reference if callers need to adjust configuration.
    pub fn problem_mut(&mut self) -> &mut P {
        &mut self.problem
    }

    /// Return the configured cancellation flag, if any.
    pub fn cancel_flag(&self) -> Option<&Arc<AtomicBool>> {
        self.cancel.as_ref()
    }

    /// Phase I: apply `forward_step` for every layer.
    ///
    /// Returns every frontier `0..=T` when `keep_all` is set, otherwise only
    /// the frontier at layer T. `guard` runs before each step and aborts the
    /// pass by returning an error.
    fn forward_pass<E, G>(&self, keep_all: bool, mut guard: G) -> Result<Vec<P::Frontier>, E>
    where
        G: FnMut(usize) -> Result<(), E>,
    {
        let t = self.problem.num_layers();

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("forward_pass", layers = t, keep_all);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut frontiers = Vec::with_capacity(if keep_all { t + 1 } else { 1 });
        frontiers.push(self.problem.init_frontier());

        for layer in 0..t {
            guard(layer)?;

            #[cfg(feature = "tracing")]
            let span = tracing::trace_span!("forward_step", layer);
            #[cfg(feature = "tracing")]
            let _enter = span.enter();

            // Never empty: seeded with the initial frontier above.
            let current = &frontiers[frontiers.len() - 1];
            let next = self.problem.forward_step(layer, current);
            if keep_all {
                frontiers.push(next);
            } else {
                frontiers[0] = next;
            }
        }

        Ok(frontiers)
    }

    fn poll_cancel(&self, layer: usize) -> Result<(), Cancelled> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(layer, "layered run cancelled");
                Err(Cancelled { layer })
            }
            _ => Ok(()),
        }
    }

    fn finish(&self, frontiers: Vec<P::Frontier>) -> (P::Cost, Vec<P::State>) {
        let cost = self.problem.extract_cost(&frontiers[frontiers.len() - 1]);

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("reconstruct", layers = frontiers.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let path = self.problem.reconstruct(&frontiers);
        (cost, path)
    }

    /// Run the full DP and reconstruct one optimal sequence of states.
    ///
    /// Keeps every frontier alive until reconstruction finishes. Ignores the
    /// cancellation flag; use [`try_run`](Self::try_run) to honour it.
    pub fn run(&self) -> (P::Cost, Vec<P::State>) {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("layer_run");
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let frontiers = match self.forward_pass(true, |_| Ok::<(), Infallible>(())) {
            Ok(frontiers) => frontiers,
            Err(never) => match never {},
        };
        self.finish(frontiers)
    }

    /// Run the DP for its objective only, keeping one live frontier.
    pub fn run_cost(&self) -> P::Cost {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("layer_run_cost");
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let frontiers = match self.forward_pass(false, |_| Ok::<(), Infallible>(())) {
            Ok(frontiers) => frontiers,
            Err(never) => match never {},
        };
        self.problem.extract_cost(&frontiers[0])
    }

    /// Like [`run`](Self::run), but checks the cancellation flag before every
    /// layer.
    pub fn try_run(&self) -> Result<(P::Cost, Vec<P::State>), Cancelled> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("layer_run");
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let frontiers = self.forward_pass(true, |layer| self.poll_cancel(layer))?;
        Ok(self.finish(frontiers))
    }

    /// Like [`run_cost`](Self::run_cost), but checks the cancellation flag
    /// before every layer.
    pub fn try_run_cost(&self) -> Result<P::Cost, Cancelled> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("layer_run_cost");
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let frontiers = self.forward_pass(false, |layer| self.poll_cancel(layer))?;
        Ok(self.problem.extract_cost(&frontiers[0]))
    }
}
