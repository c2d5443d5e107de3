use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bitmask_dp::problems::hamilton::{HamiltonProblem, WeightMatrix};
use bitmask_dp::{Cancelled, LayerEngine, LayerEngineBuilder, LayeredProblem};

/// Sums the layer indices; the path records the running total.
struct Triangle {
    layers: usize,
}

impl LayeredProblem for Triangle {
    type State = u64;
    type Frontier = u64;
    type Cost = u64;

    fn num_layers(&self) -> usize {
        self.layers
    }

    fn init_frontier(&self) -> u64 {
        0
    }

    fn forward_step(&self, layer: usize, frontier: &u64) -> u64 {
        frontier + layer as u64 + 1
    }

    fn extract_cost(&self, frontier_t: &u64) -> u64 {
        *frontier_t
    }

    fn reconstruct(&self, frontiers: &[u64]) -> Vec<u64> {
        frontiers[1..].to_vec()
    }
}

/// Raises a shared flag once it reaches a given layer.
struct Tripwire {
    layers: usize,
    trip_at: usize,
    flag: Arc<AtomicBool>,
}

impl LayeredProblem for Tripwire {
    type State = usize;
    type Frontier = usize;
    type Cost = usize;

    fn num_layers(&self) -> usize {
        self.layers
    }

    fn init_frontier(&self) -> usize {
        0
    }

    fn forward_step(&self, layer: usize, frontier: &usize) -> usize {
        if layer == self.trip_at {
            self.flag.store(true, Ordering::Relaxed);
        }
        frontier + 1
    }

    fn extract_cost(&self, frontier_t: &usize) -> usize {
        *frontier_t
    }

    fn reconstruct(&self, frontiers: &[usize]) -> Vec<usize> {
        frontiers.to_vec()
    }
}

fn sample_weights() -> WeightMatrix {
    WeightMatrix::from_rows(&[
        vec![0, 4, 1, 9],
        vec![2, 0, 7, 3],
        vec![6, 1, 0, 8],
        vec![5, 2, 4, 0],
    ])
    .unwrap()
}

#[test]
fn run_and_run_cost_agree_for_custom_problem() {
    for layers in 0..10 {
        let engine = LayerEngine::new(Triangle { layers });
        let (cost, path) = engine.run();
        let expected = (layers * (layers + 1) / 2) as u64;
        assert_eq!(cost, expected);
        assert_eq!(engine.run_cost(), expected);
        assert_eq!(path.len(), layers);
        assert_eq!(path.last().copied().unwrap_or(0), expected);
    }
}

#[test]
fn builder_matches_direct_construction() {
    let weights = sample_weights();
    let built = LayerEngineBuilder::new(HamiltonProblem::new(&weights)).build();
    let direct = LayerEngine::new(HamiltonProblem::new(&weights));
    assert_eq!(built.run(), direct.run());
    assert!(built.cancel_flag().is_none());
}

#[test]
fn cancellation_is_observed_at_the_next_layer() {
    let flag = Arc::new(AtomicBool::new(false));
    let problem = Tripwire {
        layers: 8,
        trip_at: 2,
        flag: Arc::clone(&flag),
    };
    let engine = LayerEngineBuilder::new(problem)
        .with_cancel_flag(Arc::clone(&flag))
        .build();
    assert_eq!(engine.try_run(), Err(Cancelled { layer: 3 }));

    flag.store(false, Ordering::Relaxed);
    assert_eq!(engine.try_run_cost(), Err(Cancelled { layer: 3 }));
}

#[test]
fn hamilton_try_run_matches_run_when_not_cancelled() {
    let weights = sample_weights();
    let flag = Arc::new(AtomicBool::new(false));
    let engine = LayerEngine::with_cancel_flag(HamiltonProblem::new(&weights), flag);
    let (cost, path) = engine.run();
    assert_eq!(engine.try_run(), Ok((cost, path.clone())));
    assert_eq!(engine.try_run_cost(), Ok(cost));
    assert_eq!(weights.path_cost(&path), Some(cost));
}

#[test]
fn hamilton_layer_sizes_follow_binomials() {
    let weights = sample_weights();
    let problem = HamiltonProblem::new(&weights);
    let n = weights.n();
    assert_eq!(problem.num_layers(), n - 1);

    let mut frontier = problem.init_frontier();
    let mut counts = vec![frontier.subset_count(n)];
    for layer in 0..problem.num_layers() {
        frontier = problem.forward_step(layer, &frontier);
        counts.push(frontier.subset_count(n));
    }
    // C(3, k) for k = 0..=3
    assert_eq!(counts, vec![1, 3, 3, 1]);
    assert_eq!(frontier.free_nodes, n - 1);
}
