//! Error types for prefix-code construction.

use thiserror::Error;

/// Error variants for heap, tree and report operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing or out of range (e.g., a zero queue capacity).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Growing a buffer failed to allocate.
    #[error("resource exhausted: could not grow buffer to {0} entries")]
    ResourceExhausted(usize),

    /// `extract_min` was called on an empty priority queue.
    #[error("priority queue underflow")]
    Underflow,

    /// Merging two nodes produced a weight that does not fit in `u64`.
    #[error("weight overflow while merging {0} and {1}")]
    WeightOverflow(u64, u64),

    /// A symbol's or the report's total bit count does not fit in `u64`.
    #[error("bit count overflow: {0}")]
    BitCountOverflow(String),

    /// The frequency table and the tree disagree.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// An I/O error occurred while counting input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for prefix-code operations.
pub type Result<T> = std::result::Result<T, Error>;
