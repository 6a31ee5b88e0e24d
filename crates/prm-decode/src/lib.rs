//! Decode face-indexed PRM meshes and W worlds.
//!
//! A PRM mesh stores a pool of shared positions and normals plus fixed-size
//! face records carrying per-corner colours and texture coordinates. This
//! crate expands such a mesh into flat, de-indexed attribute arrays where
//! every face owns four private slots. A W world is a sequence of PRM blocks.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives, no global state
//! - **User-controlled I/O**: Input is any forward-only [`ByteSource`]
//! - **Host-agnostic**: Output reaches host scene types only through [`MeshSink`]
//! - **Bounded**: Counts read from the input are checked against [`Limits`]
//!   before anything is allocated
//!
//! # Key functions
//!
//! - [`decode_mesh`]: Decode a single-mesh (`.prm`) stream
//! - [`decode_world`]: Decode a multi-mesh (`.w`) stream
//! - [`decode_face`]: Read one 60-byte face record
//! - [`read_pool`]: Read the shared position/normal pool
//! - [`expand`]: De-index face records against a pool
//!
//! # Example
//!
//! ```
//! use prm_decode::{SliceSource, decode_mesh};
//!
//! // Zero faces and an empty pool: the header alone.
//! let bytes = [0u8, 0, 0, 0];
//! let mesh = decode_mesh(SliceSource::new(&bytes), "car").unwrap();
//! assert_eq!(mesh.face_count, 0);
//! ```

mod error;
mod limits;

pub mod cursor;
pub mod expand;
pub mod face;
pub mod mesh;
pub mod pool;
pub mod world;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use cursor::{ByteCursor, ByteSource, ReaderSource, SliceSource, SourceError};
pub use error::{DecodeError, DecodeResult};
pub use expand::{color_to_vec4, expand};
pub use face::{FACE_RECORD_SIZE, FaceRecord, decode_face};
pub use limits::Limits;
pub use mesh::{ExpandedMesh, Face, MeshSink, SLOTS_PER_FACE, decode_mesh, decode_mesh_with_limits};
pub use pool::{POOL_ENTRY_SIZE, RawVertexPool, read_pool};
pub use world::{SUBMESH_HEADER_SIZE, decode_world, decode_world_with_limits};
