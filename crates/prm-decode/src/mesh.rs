//! Expanded mesh output and the single-mesh entry point.

use glam::{Vec2, Vec3, Vec4};

use crate::cursor::{ByteCursor, ByteSource};
use crate::error::DecodeResult;
use crate::expand::expand;
use crate::face::{FACE_RECORD_SIZE, decode_face};
use crate::limits::{Limits, check_count, try_with_capacity};
use crate::pool::{POOL_ENTRY_SIZE, read_pool};

/// Attribute slots reserved per face in an [`ExpandedMesh`].
pub const SLOTS_PER_FACE: usize = 4;

/// One output face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub(crate) corner_count: u8,
    pub(crate) indices: [u32; SLOTS_PER_FACE],
    /// Relative texture file name, if the face is textured.
    pub texture: Option<String>,
}

impl Face {
    /// 3 or 4.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        usize::from(self.corner_count)
    }

    /// Attribute slots used by this face, in winding order.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices[..self.corner_count()]
    }
}

/// A fully de-indexed mesh.
///
/// Face `i` owns attribute slots `i * 4 .. i * 4 + 4`; no slot is shared
/// between faces. Slot 3 of a triangle is never referenced and holds zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpandedMesh {
    pub face_count: u32,
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// RGBA in `[0, 1]`.
    pub colors: Vec<Vec4>,
    pub uv: Vec<Vec2>,
    pub faces: Vec<Face>,
}

impl ExpandedMesh {
    /// Number of attribute slots (`face_count * 4`).
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.vertices.len()
    }

    /// Distinct texture names referenced by the faces, in first-use order.
    #[must_use]
    pub fn texture_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.faces.iter().filter_map(|f| f.texture.as_deref()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Transcribe this mesh into a host representation.
    pub fn write_to<K: MeshSink + ?Sized>(&self, sink: &mut K) {
        sink.set_faces(&self.faces);
        sink.set_vertices(&self.vertices);
        sink.set_normals(&self.normals);
        sink.set_colors(&self.colors);
        sink.set_uv(&self.uv);
    }
}

/// Host-side receiver for decoded mesh data.
///
/// The decoder never builds host scene types itself; hosts implement this
/// and call [`ExpandedMesh::write_to`].
pub trait MeshSink {
    fn set_faces(&mut self, faces: &[Face]);
    fn set_vertices(&mut self, vertices: &[Vec3]);
    fn set_normals(&mut self, normals: &[Vec3]);
    fn set_colors(&mut self, colors: &[Vec4]);
    fn set_uv(&mut self, uv: &[Vec2]);
}

/// Decode one single-mesh block at the cursor: header, faces, pool, expand.
pub(crate) fn decode_mesh_block<S: ByteSource>(
    cursor: &mut ByteCursor<S>,
    base_name: &str,
    limits: &Limits,
) -> DecodeResult<ExpandedMesh> {
    let start = cursor.position();
    let face_count = usize::from(cursor.read_u16()?);
    let pool_count = usize::from(cursor.read_u16()?);
    tracing::debug!(face_count, pool_count, offset = start, "mesh block header");

    check_count(
        "faces",
        face_count,
        limits.max_faces,
        FACE_RECORD_SIZE,
        cursor,
    )?;
    let mut records = try_with_capacity("face records", face_count)?;
    for _ in 0..face_count {
        records.push(decode_face(cursor)?);
    }

    check_count(
        "pool vertices",
        pool_count,
        limits.max_pool_vertices,
        POOL_ENTRY_SIZE,
        cursor,
    )?;
    let pool = read_pool(cursor, pool_count)?;

    let mesh = expand(&records, &pool, base_name)?;
    tracing::trace!(
        bytes = cursor.position() - start,
        slots = mesh.slot_count(),
        "mesh block expanded"
    );
    Ok(mesh)
}

/// Decode a single-mesh (`.prm`) stream with default [`Limits`].
///
/// `base_name` prefixes the texture names of textured faces.
pub fn decode_mesh<S: ByteSource>(source: S, base_name: &str) -> DecodeResult<ExpandedMesh> {
    decode_mesh_with_limits(source, base_name, &Limits::default())
}

/// Decode a single-mesh (`.prm`) stream.
pub fn decode_mesh_with_limits<S: ByteSource>(
    source: S,
    base_name: &str,
    limits: &Limits,
) -> DecodeResult<ExpandedMesh> {
    let mut cursor = ByteCursor::new(source);
    decode_mesh_block(&mut cursor, base_name, limits)
}
