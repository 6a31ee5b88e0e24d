//! Scene representation built from decoded meshes.

use std::path::PathBuf;

use glam::{Vec2, Vec3, Vec4};
use prm_decode::{ExpandedMesh, Face, MeshSink};

/// Root node name for single-mesh imports.
pub const PRM_ROOT_NAME: &str = "<PRMROOT>";

/// Root node name for world imports.
pub const WORLD_ROOT_NAME: &str = "<WROOT>";

/// A node in the scene hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub name: String,
    /// Indices into [`Scene::meshes`].
    pub meshes: Vec<usize>,
    pub children: Vec<Node>,
}

/// A texture referenced by a mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    /// Relative texture file name as produced by the decoder.
    pub texture: String,
    /// Location on disk, once resolved.
    pub path: Option<PathBuf>,
}

/// One face of a [`SceneMesh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneFace {
    pub indices: Vec<u32>,
    /// Index into [`SceneMesh::materials`].
    pub material: Option<usize>,
}

/// Host-side mesh filled through [`MeshSink`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMesh {
    pub faces: Vec<SceneFace>,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Vec4>,
    pub uvs: Vec<Vec2>,
    pub materials: Vec<Material>,
}

impl SceneMesh {
    /// Transcribe a decoded mesh.
    #[must_use]
    pub fn from_expanded(mesh: &ExpandedMesh) -> Self {
        let mut out = Self::default();
        mesh.write_to(&mut out);
        out
    }

    /// Triangle list indices, splitting each quad into a fan of two.
    #[must_use]
    pub fn triangle_indices(&self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(self.faces.len() * 6);
        for face in &self.faces {
            let Some((&first, rest)) = face.indices.split_first() else {
                continue;
            };
            for pair in rest.windows(2) {
                indices.extend_from_slice(&[first, pair[0], pair[1]]);
            }
        }
        indices
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| f.indices.len().saturating_sub(2))
            .sum()
    }
}

impl MeshSink for SceneMesh {
    fn set_faces(&mut self, faces: &[Face]) {
        let mut materials: Vec<Material> = Vec::new();
        let mut out = Vec::with_capacity(faces.len());
        for face in faces {
            let material = face.texture.as_deref().map(|name| {
                if let Some(i) = materials.iter().position(|m| m.texture == name) {
                    i
                } else {
                    materials.push(Material {
                        texture: name.to_owned(),
                        path: None,
                    });
                    materials.len() - 1
                }
            });
            out.push(SceneFace {
                indices: face.indices().to_vec(),
                material,
            });
        }
        self.faces = out;
        self.materials = materials;
    }

    fn set_vertices(&mut self, vertices: &[Vec3]) {
        self.positions = vertices.to_vec();
    }

    fn set_normals(&mut self, normals: &[Vec3]) {
        self.normals = normals.to_vec();
    }

    fn set_colors(&mut self, colors: &[Vec4]) {
        self.colors = colors.to_vec();
    }

    fn set_uv(&mut self, uv: &[Vec2]) {
        self.uvs = uv.to_vec();
    }
}

/// An imported model: a root node referencing every mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub root: Node,
    pub meshes: Vec<SceneMesh>,
}

impl Scene {
    /// Build a scene whose root, named `root_name`, holds `meshes` in order.
    #[must_use]
    pub fn from_meshes(root_name: &str, meshes: &[ExpandedMesh]) -> Self {
        let meshes: Vec<SceneMesh> = meshes.iter().map(SceneMesh::from_expanded).collect();
        Self {
            root: Node {
                name: root_name.to_owned(),
                meshes: (0..meshes.len()).collect(),
                children: Vec::new(),
            },
            meshes,
        }
    }

    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(|m| m.faces.len()).sum()
    }

    /// All materials of all meshes.
    pub fn materials_mut(&mut self) -> impl Iterator<Item = &mut Material> {
        self.meshes.iter_mut().flat_map(|m| m.materials.iter_mut())
    }
}
