//! Shortest Hamiltonian path (Held–Karp) as a layered DP.
//!
//! Given `n` nodes and a square weight matrix, find the cheapest path that
//! starts at node 0, visits every node exactly once and ends at node `n - 1`.
//!
//! DP entry `(S, j)` is the cheapest path from node 0 through exactly the
//! nodes of `S` ending at `j`:
//!
//! ```text
//! dp[{0}][0] = 0
//! dp[S][j]   = min_{k in S \ {j}} dp[S \ {j}][k] + w[k][j]
//! ```
//!
//! Every useful `S` contains node 0, so a subset is keyed by its other
//! ("free") members. Layer `k` of [`HamiltonProblem`] holds every subset with
//! `k` free members, densely indexed by colex rank, and depends only on
//! layer `k - 1`. [`DenseTable`] is the single-table formulation that fills
//! all `2^n` subsets in increasing numeric order.
//!
//! Unreachable entries and missing edges are [`UNREACHABLE`].

use crate::bitstate::BitState;
use crate::error::InvalidInput;
use crate::subsets::SubsetIndexer;
use crate::traits::LayeredProblem;
use crate::LayerEngine;

/// Largest supported node count.
pub const MAX_NODES: usize = 20;

/// Largest accepted edge weight. Any path of at most `MAX_NODES - 1` edges
/// stays far below [`UNREACHABLE`].
pub const MAX_WEIGHT: u64 = u32::MAX as u64;

/// Sentinel for "no finite cost known" / "no edge".
pub const UNREACHABLE: u64 = u64::MAX;

/// Validated `n x n` edge weights, stored row-major in one flat buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightMatrix {
    n: usize,
    cells: Vec<u64>,
}

impl WeightMatrix {
    /// Complete graph: every ordered pair has an edge.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, InvalidInput> {
        Self::with_size(rows.len(), rows)
    }

    /// Like [`from_rows`](Self::from_rows), but checks the row count against
    /// an explicit `n`.
    pub fn with_size(n: usize, rows: &[Vec<i64>]) -> Result<Self, InvalidInput> {
        Self::build(n, rows, |&w| Some(w))
    }

    /// Graph with optional edges: `None` means "no edge from i to j".
    pub fn from_optional_rows(rows: &[Vec<Option<i64>>]) -> Result<Self, InvalidInput> {
        Self::build(rows.len(), rows, |&w| w)
    }

    fn build<T, F>(n: usize, rows: &[Vec<T>], edge: F) -> Result<Self, InvalidInput>
    where
        F: Fn(&T) -> Option<i64>,
    {
        let result = Self::validate(n, rows, edge);
        #[cfg(feature = "tracing")]
        if let Err(err) = &result {
            tracing::debug!(%err, n, "rejected weight matrix");
        }
        result
    }

    fn validate<T, F>(n: usize, rows: &[Vec<T>], edge: F) -> Result<Self, InvalidInput>
    where
        F: Fn(&T) -> Option<i64>,
    {
        check_node_count(n)?;
        if rows.len() != n {
            return Err(InvalidInput::RowCount { rows: rows.len(), n });
        }
        let mut cells = Vec::with_capacity(n * n);
        for (from, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(InvalidInput::RowLength {
                    row: from,
                    len: row.len(),
                    n,
                });
            }
            for (to, raw) in row.iter().enumerate() {
                let cell = match edge(raw) {
                    None => UNREACHABLE,
                    Some(weight) if weight < 0 => {
                        return Err(InvalidInput::NegativeWeight { from, to, weight })
                    }
                    // Self-loops never join a path.
                    Some(weight) if from == to => (weight as u64).min(MAX_WEIGHT),
                    Some(weight) if weight as u64 > MAX_WEIGHT => {
                        return Err(InvalidInput::WeightTooLarge {
                            from,
                            to,
                            weight,
                            max: MAX_WEIGHT,
                        })
                    }
                    Some(weight) => weight as u64,
                };
                cells.push(cell);
            }
        }
        Ok(Self { n, cells })
    }

    /// Number of nodes.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Weight of edge `from -> to`, or `None` if there is no such edge.
    pub fn get(&self, from: usize, to: usize) -> Option<u64> {
        match self.cell(from, to) {
            UNREACHABLE => None,
            w => Some(w),
        }
    }

    #[inline]
    fn cell(&self, from: usize, to: usize) -> u64 {
        self.cells[from * self.n + to]
    }

    /// Total weight of the consecutive edges of `path`, or `None` if one of
    /// them is missing.
    pub fn path_cost(&self, path: &[usize]) -> Option<u64> {
        path.windows(2)
            .try_fold(0u64, |acc, w| Some(acc + self.get(w[0], w[1])?))
    }
}

fn check_node_count(n: usize) -> Result<(), InvalidInput> {
    if n == 0 {
        return Err(InvalidInput::EmptyGraph);
    }
    if n > MAX_NODES {
        return Err(InvalidInput::TooManyNodes { n, max: MAX_NODES });
    }
    Ok(())
}

#[inline]
fn relax(best: &mut u64, dist: u64, weight: u64) {
    if dist == UNREACHABLE || weight == UNREACHABLE {
        return;
    }
    let cand = dist + weight;
    if cand < *best {
        *best = cand;
    }
}

/// Held–Karp over subset-size layers.
#[derive(Clone, Debug)]
pub struct HamiltonProblem<'a> {
    weights: &'a WeightMatrix,
    indexer: SubsetIndexer,
}

/// DP entries of every subset with the same number of free members.
///
/// Row `rank` (the colex rank of the free members) holds one entry per
/// possible last node.
#[derive(Clone, Debug)]
pub struct SubsetLayer {
    /// Number of free members (nodes other than 0) in each subset.
    pub free_nodes: usize,
    costs: Vec<u64>,
}

impl SubsetLayer {
    /// Number of stored subsets.
    pub fn subset_count(&self, n: usize) -> usize {
        self.costs.len() / n
    }

    /// Entries for the subset of colex rank `rank`, indexed by last node.
    #[inline]
    pub fn row(&self, rank: usize, n: usize) -> &[u64] {
        &self.costs[rank * n..(rank + 1) * n]
    }
}

/// Subset of all nodes for a free-member mask.
#[inline]
fn with_start(free: u32) -> u32 {
    (free << 1) | 1
}

impl<'a> HamiltonProblem<'a> {
    pub fn new(weights: &'a WeightMatrix) -> Self {
        Self {
            weights,
            indexer: SubsetIndexer::new(weights.n() - 1),
        }
    }

    #[inline]
    fn n(&self) -> usize {
        self.weights.n()
    }

    /// Fill `row` (entries of the subset `{0} ∪ free`) from the previous layer.
    fn relax_subset(&self, free: u32, prev: &SubsetLayer, row: &mut [u64]) {
        let n = self.n();
        for member in BitState::from(free).iter_ones() {
            let j = member + 1;
            let prev_free = free & !(1 << member);
            let prev_row = prev.row(self.indexer.rank(prev_free), n);
            let mut best = UNREACHABLE;
            for k in BitState::from(with_start(prev_free)).iter_ones() {
                relax(&mut best, prev_row[k], self.weights.cell(k, j));
            }
            row[j] = best;
        }
    }

    /// Smallest predecessor `k` of `j` in `{0} ∪ prev_free` realising `cost`.
    fn predecessor(&self, prev_row: &[u64], prev_free: u32, j: usize, cost: u64) -> Option<usize> {
        BitState::from(with_start(prev_free))
            .iter_ones()
            .find(|&k| {
                let (d, w) = (prev_row[k], self.weights.cell(k, j));
                d != UNREACHABLE && w != UNREACHABLE && d + w == cost
            })
    }
}

impl<'a> LayeredProblem for HamiltonProblem<'a> {
    type State = usize;
    type Frontier = SubsetLayer;
    type Cost = u64;

    fn num_layers(&self) -> usize {
        // one layer per free node
        self.n() - 1
    }

    fn init_frontier(&self) -> Self::Frontier {
        // Only {0}, ending at 0.
        let mut costs = vec![UNREACHABLE; self.n()];
        costs[0] = 0;
        SubsetLayer {
            free_nodes: 0,
            costs,
        }
    }

    fn forward_step(&self, layer: usize, frontier: &Self::Frontier) -> Self::Frontier {
        debug_assert_eq!(frontier.free_nodes, layer);
        let n = self.n();
        let k = layer + 1;
        let mut costs = vec![UNREACHABLE; self.indexer.count(k) * n];

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            let masks: Vec<u32> = self.indexer.iter(k).collect();
            costs
                .par_chunks_mut(n)
                .zip(masks.par_iter())
                .for_each(|(row, &free)| self.relax_subset(free, frontier, row));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (row, free) in costs.chunks_mut(n).zip(self.indexer.iter(k)) {
                self.relax_subset(free, frontier, row);
            }
        }

        SubsetLayer {
            free_nodes: k,
            costs,
        }
    }

    fn extract_cost(&self, frontier_t: &Self::Frontier) -> Self::Cost {
        // Last layer holds one subset, all nodes.
        let n = self.n();
        frontier_t.row(0, n)[n - 1]
    }

    fn reconstruct(&self, frontiers: &[Self::Frontier]) -> Vec<Self::State> {
        let n = self.n();
        debug_assert_eq!(frontiers.len(), n);
        let mut free: u32 = (1 << (n - 1)) - 1;
        let mut node = n - 1;
        let mut cost = frontiers[n - 1].row(0, n)[node];
        if cost == UNREACHABLE {
            return Vec::new();
        }

        let mut path = Vec::with_capacity(n);
        for layer in (1..n).rev() {
            path.push(node);
            let prev_free = free & !(1 << (node - 1));
            let prev_row = frontiers[layer - 1].row(self.indexer.rank(prev_free), n);
            let Some(k) = self.predecessor(prev_row, prev_free, node, cost) else {
                unreachable!("finite entry ({free:#b}, {node}) has no predecessor");
            };
            cost = prev_row[k];
            node = k;
            free = prev_free;
        }
        path.push(node);
        path.reverse();
        path
    }
}

/// The single-table formulation: one `2^n x n` table filled in increasing
/// numeric subset order.
#[derive(Clone, Debug)]
pub struct DenseTable {
    n: usize,
    dp: Vec<u64>,
}

impl DenseTable {
    pub fn build(weights: &WeightMatrix) -> Self {
        let n = weights.n();
        let limit = 1usize << n;
        let mut dp = vec![UNREACHABLE; limit * n];
        dp[n] = 0; // subset {0} ends at 0

        for subset in 1..limit {
            // Removing a member lowers the value, so every proper subset is final.
            for j in BitState::new(subset as u64).iter_ones() {
                let pre = subset ^ (1 << j);
                if pre == 0 {
                    continue;
                }
                let mut best = UNREACHABLE;
                for k in BitState::new(pre as u64).iter_ones() {
                    relax(&mut best, dp[pre * n + k], weights.cell(k, j));
                }
                dp[subset * n + j] = best;
            }
        }
        Self { n, dp }
    }

    /// Entry `(subset, last)`.
    pub fn get(&self, subset: u32, last: usize) -> u64 {
        self.dp[subset as usize * self.n + last]
    }

    /// `dp[full][n - 1]`.
    pub fn answer(&self) -> u64 {
        let full = (1u32 << self.n) - 1;
        self.get(full, self.n - 1)
    }
}

/// Minimum cost of a Hamiltonian path `0 -> .. -> n-1` over a complete graph.
///
/// ```
/// use bitmask_dp::problems::hamilton::solve;
///
/// let w = vec![vec![0, 10, 100], vec![10, 0, 10], vec![100, 10, 0]];
/// assert_eq!(solve(3, &w), Ok(20));
/// ```
pub fn solve(n: usize, weight: &[Vec<i64>]) -> Result<u64, InvalidInput> {
    let weights = WeightMatrix::with_size(n, weight)?;
    Ok(LayerEngine::new(HamiltonProblem::new(&weights)).run_cost())
}

/// Like [`solve`], for a prepared matrix that may lack edges. `None` when no
/// Hamiltonian path from 0 to `n - 1` exists.
pub fn solve_matrix(weights: &WeightMatrix) -> Option<u64> {
    match LayerEngine::new(HamiltonProblem::new(weights)).run_cost() {
        UNREACHABLE => None,
        cost => Some(cost),
    }
}

/// Dense-table variant of [`solve_matrix`].
pub fn solve_dense(weights: &WeightMatrix) -> Option<u64> {
    match DenseTable::build(weights).answer() {
        UNREACHABLE => None,
        cost => Some(cost),
    }
}

/// Minimum cost together with one optimal visiting order.
pub fn shortest_path(weights: &WeightMatrix) -> Option<(u64, Vec<usize>)> {
    let (cost, path) = LayerEngine::new(HamiltonProblem::new(weights)).run();
    (cost != UNREACHABLE).then_some((cost, path))
}
