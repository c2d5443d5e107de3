//! Error types.
//!
//! Every solver validates its input up front and either returns a complete
//! answer or one of these errors; nothing is partially computed.

use thiserror::Error;

/// Input rejected before any computation took place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("node count must be at least 1")]
    EmptyGraph,

    #[error("node count {n} exceeds the supported maximum of {max}")]
    TooManyNodes { n: usize, max: usize },

    #[error("weight matrix has {rows} rows, expected {n}")]
    RowCount { rows: usize, n: usize },

    #[error("row {row} of the weight matrix has {len} entries, expected {n}")]
    RowLength { row: usize, len: usize, n: usize },

    #[error("negative weight {weight} on edge {from} -> {to}")]
    NegativeWeight { from: usize, to: usize, weight: i64 },

    #[error("weight {weight} on edge {from} -> {to} exceeds the maximum of {max}")]
    WeightTooLarge {
        from: usize,
        to: usize,
        weight: i64,
        max: u64,
    },

    #[error("modulus must be non-zero")]
    ZeroModulus,
}

/// A run stopped because its cancellation flag was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("run cancelled before layer {layer}")]
pub struct Cancelled {
    /// The layer whose step was about to run.
    pub layer: usize,
}
