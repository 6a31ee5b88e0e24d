//! De-indexing of face records against the vertex pool.
//!
//! Colours and UVs are stored per face corner, so two faces meeting at the
//! same pool vertex may paint it differently. Every face therefore gets four
//! private attribute slots, and positions and normals are copied out of the
//! pool into them.

use glam::{Vec2, Vec3, Vec4};

use crate::error::{DecodeError, DecodeResult};
use crate::face::FaceRecord;
use crate::limits::try_with_capacity;
use crate::mesh::{ExpandedMesh, Face, SLOTS_PER_FACE};
use crate::pool::RawVertexPool;

/// Map an RGBA8 colour to `[0, 1]` floats by exact division by 255.
#[must_use]
pub fn color_to_vec4(rgba: [u8; 4]) -> Vec4 {
    Vec4::from_array(rgba.map(|c| f32::from(c) / 255.0))
}

fn zeroed<T: Clone>(what: &'static str, value: T, len: usize) -> DecodeResult<Vec<T>> {
    let mut v = try_with_capacity(what, len)?;
    v.resize(len, value);
    Ok(v)
}

/// Expand `records` into a mesh where face `i` owns slots `i * 4 .. i * 4 + 4`.
///
/// Only the first `corner_count` slots of each face are filled from the
/// record and the pool; the rest stay zero.
pub fn expand(
    records: &[FaceRecord],
    pool: &RawVertexPool,
    base_name: &str,
) -> DecodeResult<ExpandedMesh> {
    let slots = records.len() * SLOTS_PER_FACE;
    let mut vertices = zeroed("vertices", Vec3::ZERO, slots)?;
    let mut normals = zeroed("normals", Vec3::ZERO, slots)?;
    let mut colors = zeroed("colors", Vec4::ZERO, slots)?;
    let mut uv = zeroed("uvs", Vec2::ZERO, slots)?;
    let mut faces = try_with_capacity("faces", records.len())?;

    for (i, record) in records.iter().enumerate() {
        let base = i * SLOTS_PER_FACE;
        let corners = record.corner_count();
        let mut indices = [0u32; SLOTS_PER_FACE];

        for corner in 0..corners {
            let slot = base + corner;
            let index = record.original_indices[corner];
            let (position, normal) = pool.get(usize::from(index)).ok_or(
                DecodeError::VertexIndexOutOfRange {
                    face: i,
                    corner,
                    index,
                    pool_len: pool.len(),
                },
            )?;

            vertices[slot] = position;
            normals[slot] = normal;
            colors[slot] = color_to_vec4(record.colors[corner]);
            uv[slot] = record.uv[corner];
            indices[corner] = u32::try_from(slot).map_err(|_| DecodeError::AllocationFailure {
                what: "slot index",
                requested: slot,
                limit: u32::MAX as usize,
            })?;
        }

        faces.push(Face {
            corner_count: if record.is_quad() { 4 } else { 3 },
            indices,
            texture: record.texture_name(base_name),
        });
    }

    let face_count = u32::try_from(records.len()).map_err(|_| DecodeError::AllocationFailure {
        what: "faces",
        requested: records.len(),
        limit: u32::MAX as usize,
    })?;

    Ok(ExpandedMesh {
        face_count,
        vertices,
        normals,
        colors,
        uv,
        faces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{ByteCursor, SliceSource};
    use crate::face::decode_face;
    use crate::pool::read_pool;
    use crate::testing::{MeshWriter, PoolEntry, face, numbered_pool};
    use proptest::prelude::*;

    fn records(specs: &[face::FaceSpec]) -> Vec<FaceRecord> {
        let mut w = MeshWriter::new();
        for spec in specs {
            w.face(spec);
        }
        let mut cursor = ByteCursor::new(SliceSource::new(w.as_bytes()));
        specs
            .iter()
            .map(|_| decode_face(&mut cursor).unwrap())
            .collect()
    }

    fn pool(entries: &[PoolEntry]) -> RawVertexPool {
        let mut w = MeshWriter::new();
        for &entry in entries {
            w.vertex(entry);
        }
        let mut cursor = ByteCursor::new(SliceSource::new(w.as_bytes()));
        read_pool(&mut cursor, entries.len()).unwrap()
    }

    #[test]
    fn color_mapping_is_exact() {
        let c = color_to_vec4([255, 0, 128, 1]);
        assert_eq!(c.x, 1.0);
        assert_eq!(c.y, 0.0);
        assert_eq!(c.z, 128.0 / 255.0);
        assert_eq!(c.w, 1.0 / 255.0);
    }

    #[test]
    fn faces_own_private_slots() {
        // Two faces sharing pool vertices 1 and 2 with different colours.
        let recs = records(&[
            face::triangle([0, 1, 2]).colors([[255, 0, 0, 255]; 4]),
            face::quad([1, 2, 3, 0]).colors([[0, 0, 255, 255]; 4]),
        ]);
        let mesh = expand(&recs, &pool(&numbered_pool(4)), "m").unwrap();

        assert_eq!(mesh.face_count, 2);
        assert_eq!(mesh.faces[0].indices(), &[0, 1, 2]);
        assert_eq!(mesh.faces[1].indices(), &[4, 5, 6, 7]);
        assert_eq!(mesh.vertices[1], mesh.vertices[4]);
        assert_ne!(mesh.colors[1], mesh.colors[4]);
    }

    #[test]
    fn triangle_fourth_slot_is_zero() {
        let recs = records(&[face::triangle([1, 1, 1])
            .indices([1, 1, 1, 1])
            .uv([[0.5, 0.5]; 4])]);
        let mesh = expand(&recs, &pool(&numbered_pool(2)), "m").unwrap();
        assert_eq!(mesh.vertices[3], Vec3::ZERO);
        assert_eq!(mesh.normals[3], Vec3::ZERO);
        assert_eq!(mesh.colors[3], Vec4::ZERO);
        assert_eq!(mesh.uv[3], Vec2::ZERO);
        assert_eq!(mesh.uv[2], Vec2::splat(0.5));
    }

    #[test]
    fn unused_slot_index_is_not_checked() {
        // Slot 3 of a triangle may hold any value, even past the pool.
        let recs = records(&[face::triangle([0, 1, 2]).indices([0, 1, 2, 999])]);
        assert!(expand(&recs, &pool(&numbered_pool(3)), "m").is_ok());
    }

    #[test]
    fn out_of_range_index_fails() {
        let recs = records(&[face::triangle([0, 1, 2]), face::quad([0, 1, 2, 3])]);
        let err = expand(&recs, &pool(&numbered_pool(3)), "m").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::VertexIndexOutOfRange {
                face: 1,
                corner: 3,
                index: 3,
                pool_len: 3,
            }
        ));
    }

    #[test]
    fn texture_names_use_base_name() {
        let recs = records(&[
            face::triangle([0, 0, 0]).texture(0),
            face::triangle([0, 0, 0]),
            face::triangle([0, 0, 0]).texture(1),
        ]);
        let mesh = expand(&recs, &pool(&numbered_pool(1)), "body").unwrap();
        assert_eq!(mesh.faces[0].texture.as_deref(), Some("bodya.bmp"));
        assert_eq!(mesh.faces[1].texture, None);
        assert_eq!(mesh.faces[2].texture.as_deref(), Some("bodyb.bmp"));
    }

    fn arb_face(pool_len: u16) -> impl Strategy<Value = face::FaceSpec> {
        (
            any::<u16>(),
            prop::array::uniform4(0..pool_len),
            prop::array::uniform4(any::<[u8; 4]>()),
        )
            .prop_map(|(flags, indices, colors)| {
                face::triangle([0, 0, 0])
                    .flags(flags)
                    .indices(indices)
                    .colors(colors)
            })
    }

    proptest! {
        #[test]
        fn expansion_preserves_pool_attributes(
            specs in prop::collection::vec(arb_face(8), 0..32)
        ) {
            let recs = records(&specs);
            let raw = pool(&numbered_pool(8));
            let mesh = expand(&recs, &raw, "m").unwrap();

            let slots = specs.len() * SLOTS_PER_FACE;
            prop_assert_eq!(mesh.face_count as usize, specs.len());
            prop_assert_eq!(mesh.vertices.len(), slots);
            prop_assert_eq!(mesh.normals.len(), slots);
            prop_assert_eq!(mesh.colors.len(), slots);
            prop_assert_eq!(mesh.uv.len(), slots);

            for (i, (spec, face)) in specs.iter().zip(&mesh.faces).enumerate() {
                let corners = 3 + usize::from(spec.flags & 1);
                prop_assert_eq!(face.corner_count(), corners);
                for corner in 0..corners {
                    let slot = i * 4 + corner;
                    let original = usize::from(spec.indices[corner]);
                    prop_assert_eq!(face.indices()[corner] as usize, slot);
                    prop_assert_eq!(mesh.vertices[slot], raw.positions[original]);
                    prop_assert_eq!(mesh.normals[slot], raw.normals[original]);
                    prop_assert_eq!(mesh.colors[slot], color_to_vec4(spec.colors[corner]));
                }
            }
        }
    }
}
