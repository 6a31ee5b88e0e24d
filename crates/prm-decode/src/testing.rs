//! Byte-level encoder for building PRM and W fixtures in tests.
//!
//! Nothing here validates its input: tests use it to produce malformed
//! streams as readily as well-formed ones.

/// Builder for one face record.
pub mod face {
    use crate::face::{FLAG_QUAD, NO_TEXTURE};

    /// Field values for one face record.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct FaceSpec {
        pub flags: u16,
        pub texture_index: i16,
        pub indices: [u16; 4],
        pub colors: [[u8; 4]; 4],
        pub uv: [[f32; 2]; 4],
    }

    /// Triangle with white corners, zero UVs and no texture. Slot 3 repeats
    /// the first index.
    #[must_use]
    pub fn triangle(indices: [u16; 3]) -> FaceSpec {
        FaceSpec {
            flags: 0,
            texture_index: NO_TEXTURE,
            indices: [indices[0], indices[1], indices[2], indices[0]],
            colors: [[255; 4]; 4],
            uv: [[0.0; 2]; 4],
        }
    }

    /// Quad with white corners, zero UVs and no texture.
    #[must_use]
    pub fn quad(indices: [u16; 4]) -> FaceSpec {
        FaceSpec {
            flags: FLAG_QUAD,
            ..triangle([indices[0], indices[1], indices[2]])
        }
        .indices(indices)
    }

    impl FaceSpec {
        #[must_use]
        pub fn flags(mut self, flags: u16) -> Self {
            self.flags = flags;
            self
        }

        #[must_use]
        pub fn texture(mut self, texture_index: i16) -> Self {
            self.texture_index = texture_index;
            self
        }

        #[must_use]
        pub fn indices(mut self, indices: [u16; 4]) -> Self {
            self.indices = indices;
            self
        }

        #[must_use]
        pub fn colors(mut self, colors: [[u8; 4]; 4]) -> Self {
            self.colors = colors;
            self
        }

        #[must_use]
        pub fn uv(mut self, uv: [[f32; 2]; 4]) -> Self {
            self.uv = uv;
            self
        }
    }
}

/// One pool entry: position then normal.
pub type PoolEntry = ([f32; 3], [f32; 3]);

/// Little-endian byte writer mirroring the decoder's layouts.
#[derive(Debug, Default, Clone)]
pub struct MeshWriter {
    bytes: Vec<u8>,
}

impl MeshWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn f32(&mut self, value: f32) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Mesh block header: face count then pool count.
    pub fn header(&mut self, face_count: u16, pool_count: u16) -> &mut Self {
        self.u16(face_count).u16(pool_count)
    }

    pub fn face(&mut self, face: &face::FaceSpec) -> &mut Self {
        self.u16(face.flags);
        self.bytes.extend_from_slice(&face.texture_index.to_le_bytes());
        for index in face.indices {
            self.u16(index);
        }
        for color in face.colors {
            self.bytes.extend_from_slice(&color);
        }
        for [u, v] in face.uv {
            self.f32(u).f32(v);
        }
        self
    }

    pub fn vertex(&mut self, entry: PoolEntry) -> &mut Self {
        let (position, normal) = entry;
        for c in position.into_iter().chain(normal) {
            self.f32(c);
        }
        self
    }

    /// A complete single-mesh block.
    ///
    /// # Panics
    ///
    /// Panics if either count does not fit the `u16` header fields.
    pub fn mesh(&mut self, faces: &[face::FaceSpec], pool: &[PoolEntry]) -> &mut Self {
        let face_count = u16::try_from(faces.len()).expect("face count fits u16");
        let pool_count = u16::try_from(pool.len()).expect("pool count fits u16");
        self.header(face_count, pool_count);
        for face in faces {
            self.face(face);
        }
        for &entry in pool {
            self.vertex(entry);
        }
        self
    }

    /// World submesh count.
    pub fn submesh_count(&mut self, count: u32) -> &mut Self {
        self.u32(count)
    }

    /// The 40-byte reserved header preceding each world submesh.
    pub fn reserved_header(&mut self, fill: u8) -> &mut Self {
        self.bytes.extend_from_slice(&[fill; crate::world::SUBMESH_HEADER_SIZE]);
        self
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A small pool of distinct, easily recognised entries: entry `i` has
/// position `(i, 2i, 3i)` and normal `(0, 0, i)`.
#[must_use]
pub fn numbered_pool(count: u16) -> Vec<PoolEntry> {
    (0..count)
        .map(|i| {
            let i = f32::from(i);
            ([i, 2.0 * i, 3.0 * i], [0.0, 0.0, i])
        })
        .collect()
}
