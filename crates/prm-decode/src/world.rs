//! Multi-mesh world decoding.
//!
//! A world is a `u32` submesh count followed by that many submeshes, each a
//! 40-byte reserved header and then an ordinary mesh block. The header's
//! contents are not interpreted.

use crate::cursor::{ByteCursor, ByteSource};
use crate::error::DecodeResult;
use crate::limits::{Limits, check_count, try_with_capacity};
use crate::mesh::{ExpandedMesh, decode_mesh_block};

/// Reserved bytes in front of every submesh.
pub const SUBMESH_HEADER_SIZE: usize = 40;

/// Smallest possible submesh: reserved header plus an empty mesh header.
const MIN_SUBMESH_SIZE: usize = SUBMESH_HEADER_SIZE + 4;

/// Decode a world (`.w`) stream with default [`Limits`].
///
/// Meshes are returned in stream order. Every submesh uses `base_name` for
/// its texture names.
pub fn decode_world<S: ByteSource>(
    source: S,
    base_name: &str,
) -> DecodeResult<Vec<ExpandedMesh>> {
    decode_world_with_limits(source, base_name, &Limits::default())
}

/// Decode a world (`.w`) stream.
pub fn decode_world_with_limits<S: ByteSource>(
    source: S,
    base_name: &str,
    limits: &Limits,
) -> DecodeResult<Vec<ExpandedMesh>> {
    let mut cursor = ByteCursor::new(source);
    decode_world_blocks(&mut cursor, base_name, limits)
}

fn decode_world_blocks<S: ByteSource>(
    cursor: &mut ByteCursor<S>,
    base_name: &str,
    limits: &Limits,
) -> DecodeResult<Vec<ExpandedMesh>> {
    let count = cursor.read_u32()?;
    let count = usize::try_from(count).unwrap_or(usize::MAX);
    tracing::debug!(submeshes = count, "world header");

    check_count(
        "submeshes",
        count,
        limits.max_submeshes,
        MIN_SUBMESH_SIZE,
        cursor,
    )?;

    let mut meshes = try_with_capacity("submeshes", count)?;
    for index in 0..count {
        cursor.skip(SUBMESH_HEADER_SIZE)?;
        let _span = tracing::trace_span!("submesh", index).entered();
        meshes.push(decode_mesh_block(cursor, base_name, limits)?);
    }
    Ok(meshes)
}
