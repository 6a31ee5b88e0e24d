use std::fs;
use std::path::PathBuf;

use glam::{Vec2, Vec3, Vec4};
use prm::{DecodeError, Error, ImportOptions, Limits, PRM_ROOT_NAME, Registry, WORLD_ROOT_NAME};
use prm_decode::testing::{MeshWriter, face, numbered_pool};

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("prm-import-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn car_bytes() -> Vec<u8> {
    let mut w = MeshWriter::new();
    w.mesh(
        &[
            face::quad([0, 1, 2, 3])
                .texture(0)
                .colors([[255, 255, 255, 255], [128, 128, 128, 255], [0, 0, 0, 255], [255, 0, 0, 0]])
                .uv([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
            face::triangle([3, 1, 0]).texture(1),
            face::triangle([0, 2, 1]),
        ],
        &numbered_pool(4),
    );
    w.into_bytes()
}

#[test]
fn imports_single_mesh_from_bytes() {
    let scene = Registry::default()
        .read_bytes("car.prm", &car_bytes(), &ImportOptions::default())
        .unwrap();

    assert_eq!(scene.root.name, PRM_ROOT_NAME);
    assert_eq!(scene.root.meshes, [0]);
    assert_eq!(scene.mesh_count(), 1);

    let mesh = &scene.meshes[0];
    assert_eq!(mesh.faces.len(), 3);
    assert_eq!(mesh.positions.len(), 12);
    assert_eq!(mesh.normals.len(), 12);
    assert_eq!(mesh.colors.len(), 12);
    assert_eq!(mesh.uvs.len(), 12);

    assert_eq!(mesh.faces[0].indices, [0, 1, 2, 3]);
    assert_eq!(mesh.faces[1].indices, [4, 5, 6]);
    assert_eq!(mesh.faces[2].indices, [8, 9, 10]);

    assert_eq!(mesh.colors[0], Vec4::ONE);
    assert_eq!(mesh.colors[1], Vec4::new(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 1.0));
    assert_eq!(mesh.colors[3], Vec4::new(1.0, 0.0, 0.0, 0.0));
    assert_eq!(mesh.uvs[2], Vec2::ONE);

    // Second face: pool vertices 3, 1, 0.
    assert_eq!(mesh.positions[4], Vec3::new(3.0, 6.0, 9.0));
    assert_eq!(mesh.positions[5], Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(mesh.normals[6], Vec3::ZERO);
    assert_eq!(mesh.positions[7], Vec3::ZERO);

    let textures: Vec<&str> = mesh.materials.iter().map(|m| m.texture.as_str()).collect();
    assert_eq!(textures, ["cara.bmp", "carb.bmp"]);
    assert_eq!(mesh.faces[2].material, None);
}

#[test]
fn imports_world_from_bytes() {
    let mut w = MeshWriter::new();
    w.submesh_count(2);
    w.reserved_header(0x11)
        .mesh(&[face::triangle([0, 1, 2]).texture(3)], &numbered_pool(3));
    w.reserved_header(0x22)
        .mesh(&[face::quad([1, 0, 1, 0]), face::quad([0, 0, 0, 0])], &numbered_pool(2));

    let scene = Registry::default()
        .read_bytes("track.W", w.as_bytes(), &ImportOptions::default())
        .unwrap();

    assert_eq!(scene.root.name, WORLD_ROOT_NAME);
    assert_eq!(scene.root.meshes, [0, 1]);
    assert_eq!(scene.meshes[0].faces.len(), 1);
    assert_eq!(scene.meshes[1].faces.len(), 2);
    assert_eq!(scene.meshes[0].materials[0].texture, "trackd.bmp");
    assert_eq!(scene.meshes[1].positions[4], Vec3::ZERO);
    assert_eq!(scene.meshes[1].positions[0], Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn decode_failure_produces_no_scene() {
    let mut bytes = car_bytes();
    bytes.truncate(bytes.len() - 1);

    let err = Registry::default()
        .read_bytes("car.prm", &bytes, &ImportOptions::default())
        .unwrap_err();
    match err {
        Error::Decode { name, source } => {
            assert_eq!(name, "car.prm");
            assert!(matches!(
                source,
                DecodeError::TruncatedInput {
                    offset: 184,
                    needed: 96,
                    available: 95,
                }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn limits_flow_through_options() {
    let mut w = MeshWriter::new();
    w.submesh_count(2);
    for _ in 0..2 {
        w.reserved_header(0).mesh(&[], &[]);
    }
    let options = ImportOptions::default().with_limits(Limits::default().with_max_submeshes(1));
    let err = Registry::default()
        .read_bytes("two.w", w.as_bytes(), &options)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Decode {
            source: DecodeError::AllocationFailure { what: "submeshes", .. },
            ..
        }
    ));
}

#[test]
fn reads_file_and_resolves_textures() {
    let dir = scratch_dir("file");
    let model = dir.join("car.prm");
    fs::write(&model, car_bytes()).unwrap();
    fs::write(dir.join("cara.bmp"), b"BM").unwrap();

    let registry = Registry::default();
    let scene = registry.read_file(&model, &ImportOptions::default()).unwrap();
    let materials = &scene.meshes[0].materials;
    assert_eq!(materials[0].path.as_deref(), Some(dir.join("cara.bmp").as_path()));
    assert_eq!(materials[1].path, None);

    let unresolved = registry
        .read_file(&model, &ImportOptions::default().with_resolve_textures(false))
        .unwrap();
    assert!(unresolved.meshes[0].materials.iter().all(|m| m.path.is_none()));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn file_stem_names_textures_and_errors() {
    let dir = scratch_dir("stem");
    let model = dir.join("Truck.PRM");
    fs::write(&model, car_bytes()).unwrap();

    let registry = Registry::default();
    let options = ImportOptions::default().with_resolve_textures(false);
    let scene = registry.read_file(&model, &options).unwrap();
    assert_eq!(scene.meshes[0].materials[0].texture, "Trucka.bmp");

    let mut short = car_bytes();
    short.truncate(10);
    fs::write(&model, short).unwrap();
    match registry.read_file(&model, &options).unwrap_err() {
        Error::Decode { name, source } => {
            assert_eq!(name, model.display().to_string());
            assert!(matches!(source, DecodeError::TruncatedInput { offset: 4, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_is_io_error() {
    let dir = scratch_dir("missing");
    let err = Registry::default()
        .read_file(dir.join("nope.prm"), &ImportOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(matches!(
        Registry::default().read_file(dir.join("nope.txt"), &ImportOptions::default()),
        Err(Error::UnsupportedFormat(_))
    ));
    fs::remove_dir_all(&dir).unwrap();
}
