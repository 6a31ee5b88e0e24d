//! Import PRM meshes and W worlds into a simple scene graph.
//!
//! This crate is the host side around [`prm_decode`]: it picks an importer by
//! file extension, reads the file, drives the decoder and transcribes the
//! result into [`Scene`] through the decoder's [`MeshSink`](prm_decode::MeshSink)
//! capability.
//!
//! # Design principles
//!
//! - **Sync decoding**: Decoding is synchronous; callers parallelize across files
//! - **Registry dispatch**: Importers are `(extension predicate, decode fn)` pairs
//! - **Relative textures**: The decoder names textures, this crate finds them
//!
//! # Example
//!
//! ```ignore
//! use prm::{ImportOptions, Registry};
//!
//! let scene = Registry::default().read_file("models/car.prm", &ImportOptions::default())?;
//! println!("{} faces", scene.face_count());
//! ```

mod error;

pub mod importer;
pub mod scene;
pub mod texture;

pub use error::{Error, Result};
pub use importer::{ImportOptions, Importer, ImporterDesc, Registry, has_extension};
pub use scene::{Material, Node, PRM_ROOT_NAME, Scene, SceneFace, SceneMesh, WORLD_ROOT_NAME};
pub use texture::{find_texture, resolve_textures};

// Re-export decoder types for convenience.
pub use prm_decode::{DecodeError, ExpandedMesh, Face, Limits, MeshSink};
