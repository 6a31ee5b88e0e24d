//! Vertex pool reading.

use glam::Vec3;

use crate::cursor::{ByteCursor, ByteSource};
use crate::error::DecodeResult;
use crate::limits::try_with_capacity;

/// Size of one pool entry in the stream: position then normal, 3 × f32 each.
pub const POOL_ENTRY_SIZE: usize = 6 * 4;

/// Positions and normals shared by the faces of one mesh block, indexed by
/// original vertex id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawVertexPool {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl RawVertexPool {
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position and normal of original vertex `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(Vec3, Vec3)> {
        Some((*self.positions.get(index)?, *self.normals.get(index)?))
    }
}

fn read_vec3<S: ByteSource>(cursor: &mut ByteCursor<S>) -> DecodeResult<Vec3> {
    let x = cursor.read_f32()?;
    let y = cursor.read_f32()?;
    let z = cursor.read_f32()?;
    Ok(Vec3::new(x, y, z))
}

/// Read `count` pool entries.
///
/// The caller is expected to have bounded `count` already.
pub fn read_pool<S: ByteSource>(
    cursor: &mut ByteCursor<S>,
    count: usize,
) -> DecodeResult<RawVertexPool> {
    let mut positions = try_with_capacity("pool positions", count)?;
    let mut normals = try_with_capacity("pool normals", count)?;
    for _ in 0..count {
        positions.push(read_vec3(cursor)?);
        normals.push(read_vec3(cursor)?);
    }
    Ok(RawVertexPool { positions, normals })
}
