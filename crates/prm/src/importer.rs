//! Importer registry.
//!
//! Formats carry no signature, so an importer is chosen purely by file
//! extension. Each registered [`Importer`] pairs an extension predicate with a
//! decode function; the decoder itself knows nothing about the registry.

use std::fs;
use std::path::Path;

use prm_decode::{
    DecodeResult, Limits, SliceSource, decode_mesh_with_limits, decode_world_with_limits,
};

use crate::error::{Error, Result};
use crate::scene::{PRM_ROOT_NAME, Scene, WORLD_ROOT_NAME};
use crate::texture::resolve_textures;

/// Static description of an importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImporterDesc {
    pub name: &'static str,
    /// Lower-case extensions without the dot.
    pub extensions: &'static [&'static str],
    /// The format is binary rather than text.
    pub binary: bool,
}

/// Decodes a whole file's bytes into a scene. The `&str` is the base name
/// used for texture names.
pub type DecodeFn = fn(&[u8], &str, &Limits) -> DecodeResult<Scene>;

/// An extension predicate paired with a decode function.
#[derive(Debug, Clone, Copy)]
pub struct Importer {
    pub desc: ImporterDesc,
    can_read: fn(&Path) -> bool,
    decode: DecodeFn,
}

/// Case-insensitive check of the final extension of `path`.
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

fn decode_prm(bytes: &[u8], base_name: &str, limits: &Limits) -> DecodeResult<Scene> {
    let mesh = decode_mesh_with_limits(SliceSource::new(bytes), base_name, limits)?;
    Ok(Scene::from_meshes(PRM_ROOT_NAME, std::slice::from_ref(&mesh)))
}

fn decode_w(bytes: &[u8], base_name: &str, limits: &Limits) -> DecodeResult<Scene> {
    let meshes = decode_world_with_limits(SliceSource::new(bytes), base_name, limits)?;
    Ok(Scene::from_meshes(WORLD_ROOT_NAME, &meshes))
}

impl Importer {
    /// Create an importer from its parts.
    #[must_use]
    pub fn new(desc: ImporterDesc, can_read: fn(&Path) -> bool, decode: DecodeFn) -> Self {
        Self {
            desc,
            can_read,
            decode,
        }
    }

    /// Single-mesh `.prm` importer.
    #[must_use]
    pub fn prm() -> Self {
        Self::new(
            ImporterDesc {
                name: "PRM Importer",
                extensions: &["prm"],
                binary: true,
            },
            |path| has_extension(path, "prm"),
            decode_prm,
        )
    }

    /// Multi-mesh `.w` world importer.
    #[must_use]
    pub fn world() -> Self {
        Self::new(
            ImporterDesc {
                name: "W Importer",
                extensions: &["w"],
                binary: true,
            },
            |path| has_extension(path, "w"),
            decode_w,
        )
    }

    #[must_use]
    pub fn can_read(&self, path: &Path) -> bool {
        (self.can_read)(path)
    }

    pub fn decode(&self, bytes: &[u8], base_name: &str, limits: &Limits) -> DecodeResult<Scene> {
        (self.decode)(bytes, base_name, limits)
    }
}

/// Options for [`Registry::read_file`] and [`Registry::read_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    pub limits: Limits,
    /// Look up texture files next to the model after loading.
    pub resolve_textures: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            resolve_textures: true,
        }
    }
}

impl ImportOptions {
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_resolve_textures(mut self, resolve: bool) -> Self {
        self.resolve_textures = resolve;
        self
    }
}

/// Ordered set of importers; the first whose predicate accepts a path wins.
#[derive(Debug, Clone)]
pub struct Registry {
    importers: Vec<Importer>,
}

impl Default for Registry {
    /// Registry with the `.prm` and `.w` importers.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Importer::prm());
        registry.register(Importer::world());
        registry
    }
}

impl Registry {
    /// Registry with no importers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            importers: Vec::new(),
        }
    }

    pub fn register(&mut self, importer: Importer) {
        tracing::debug!("Registered {}", importer.desc.name);
        self.importers.push(importer);
    }

    #[must_use]
    pub fn importers(&self) -> &[Importer] {
        &self.importers
    }

    /// The importer that handles `path`, if any.
    #[must_use]
    pub fn find(&self, path: &Path) -> Option<&Importer> {
        self.importers.iter().find(|i| i.can_read(path))
    }

    /// Decode in-memory model data. `name` selects the importer and supplies
    /// the base name for textures.
    pub fn read_bytes(&self, name: &str, bytes: &[u8], options: &ImportOptions) -> Result<Scene> {
        let path = Path::new(name);
        let importer = self
            .find(path)
            .ok_or_else(|| Error::UnsupportedFormat(name.to_owned()))?;
        decode_with(importer, path, bytes, options)
    }

    /// Read and decode a model file, then resolve its textures if enabled.
    pub fn read_file(&self, path: impl AsRef<Path>, options: &ImportOptions) -> Result<Scene> {
        let path = path.as_ref();
        let importer = self
            .find(path)
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;

        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut scene = decode_with(importer, path, &bytes, options)?;

        if options.resolve_textures {
            let found = resolve_textures(&mut scene, path);
            tracing::debug!("Resolved {} textures for {}", found, path.display());
        }
        Ok(scene)
    }
}

/// Run `importer` over `bytes`, using the stem of `path` as the texture base
/// name.
fn decode_with(
    importer: &Importer,
    path: &Path,
    bytes: &[u8],
    options: &ImportOptions,
) -> Result<Scene> {
    let base_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let name = path.display().to_string();

    let scene = importer
        .decode(bytes, base_name, &options.limits)
        .map_err(|source| Error::Decode {
            name: name.clone(),
            source,
        })?;

    tracing::info!(
        "Loaded {} with {}: {} meshes, {} faces",
        name,
        importer.desc.name,
        scene.mesh_count(),
        scene.face_count()
    );
    Ok(scene)
}
