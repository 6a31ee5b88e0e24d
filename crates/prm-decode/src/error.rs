//! Decode error types.

use thiserror::Error;

/// Errors produced while decoding a mesh or world block.
///
/// Every error is terminal for the block being decoded: no partial mesh is
/// ever returned alongside one.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A read or skip would pass the end of the source.
    #[error("truncated input: needed {needed} bytes at offset {offset}, {available} available")]
    TruncatedInput {
        offset: u64,
        needed: usize,
        available: usize,
    },

    /// A count read from the input cannot be allocated.
    #[error("cannot allocate {requested} {what} (limit {limit})")]
    AllocationFailure {
        what: &'static str,
        requested: usize,
        limit: usize,
    },

    /// A face references a vertex outside the vertex pool.
    #[error("face {face} corner {corner} references vertex {index}, pool has {pool_len}")]
    VertexIndexOutOfRange {
        face: usize,
        corner: usize,
        index: u16,
        pool_len: usize,
    },

    /// The underlying reader failed.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
