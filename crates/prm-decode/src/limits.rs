//! Upper bounds on counts read from untrusted input.

use crate::cursor::{ByteCursor, ByteSource};
use crate::error::{DecodeError, DecodeResult};

/// Bounds applied before any count read from the input is used to allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum faces per mesh block.
    pub max_faces: usize,
    /// Maximum entries in a vertex pool.
    pub max_pool_vertices: usize,
    /// Maximum submeshes in a world.
    pub max_submeshes: usize,
}

impl Limits {
    /// Largest submesh count accepted by default.
    pub const DEFAULT_MAX_SUBMESHES: usize = 4096;

    #[must_use]
    pub fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    #[must_use]
    pub fn with_max_pool_vertices(mut self, max_pool_vertices: usize) -> Self {
        self.max_pool_vertices = max_pool_vertices;
        self
    }

    #[must_use]
    pub fn with_max_submeshes(mut self, max_submeshes: usize) -> Self {
        self.max_submeshes = max_submeshes;
        self
    }
}

impl Default for Limits {
    /// The format maxima for faces and pool entries (both stored as `u16`).
    fn default() -> Self {
        Self {
            max_faces: usize::from(u16::MAX),
            max_pool_vertices: usize::from(u16::MAX),
            max_submeshes: Self::DEFAULT_MAX_SUBMESHES,
        }
    }
}

/// Reject `count` items of `item_size` bytes before anything is allocated.
///
/// A count over `limit` is a [`DecodeError::AllocationFailure`]. A count
/// that cannot fit in what the source still holds is reported as
/// [`DecodeError::TruncatedInput`] at the cursor's offset, the same error a
/// streamed source produces once it runs dry.
pub(crate) fn check_count<S: ByteSource>(
    what: &'static str,
    count: usize,
    limit: usize,
    item_size: usize,
    cursor: &ByteCursor<S>,
) -> DecodeResult<()> {
    if count > limit {
        return Err(DecodeError::AllocationFailure {
            what,
            requested: count,
            limit,
        });
    }
    if let Some(available) = cursor.remaining() {
        let needed = count.saturating_mul(item_size);
        if needed > available {
            return Err(DecodeError::TruncatedInput {
                offset: cursor.position(),
                needed,
                available,
            });
        }
    }
    Ok(())
}

/// Allocate an empty vector with room for exactly `count` items.
pub(crate) fn try_with_capacity<T>(what: &'static str, count: usize) -> DecodeResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(count)
        .map_err(|_| DecodeError::AllocationFailure {
            what,
            requested: count,
            limit: 0,
        })?;
    Ok(v)
}
