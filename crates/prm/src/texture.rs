//! Texture path resolution.
//!
//! Decoded meshes only carry relative texture names such as `cara.bmp`.
//! Textures are looked up next to the model file, first by exact name and then
//! case-insensitively.

use std::fs;
use std::path::{Path, PathBuf};

use crate::scene::Scene;

/// Find `name` in `dir`.
#[must_use]
pub fn find_texture(dir: &Path, name: &str) -> Option<PathBuf> {
    let exact = dir.join(name);
    if exact.is_file() {
        return Some(exact);
    }

    let entries = fs::read_dir(dir).ok()?;
    entries
        .filter_map(std::result::Result::ok)
        .find(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|f| f.eq_ignore_ascii_case(name))
        })
        .map(|entry| entry.path())
}

/// Resolve every material of `scene` against the directory of `model_path`.
///
/// Returns the number of textures found. Missing textures are logged and
/// left unresolved.
pub fn resolve_textures(scene: &mut Scene, model_path: &Path) -> usize {
    let dir = model_path.parent().unwrap_or_else(|| Path::new("."));
    let mut resolved = 0;
    for material in scene.materials_mut() {
        material.path = find_texture(dir, &material.texture);
        if material.path.is_some() {
            resolved += 1;
        } else {
            tracing::warn!(
                "Texture {} not found in {}",
                material.texture,
                dir.display()
            );
        }
    }
    resolved
}
