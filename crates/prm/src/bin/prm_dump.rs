//! Decode PRM/W files and print a JSON summary of each.
//!
//! Run: `cargo run -p prm --features tools --bin prm_dump -- <files>...`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use prm::{ImportOptions, Limits, Registry, Scene};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(about = "Decode PRM/W files and print a JSON summary")]
struct Args {
    /// Model files (`.prm` or `.w`).
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Number of leading attribute slots to include per mesh.
    #[arg(long, default_value_t = 5)]
    first_slots: usize,

    /// Maximum submeshes accepted in a world.
    #[arg(long, default_value_t = Limits::DEFAULT_MAX_SUBMESHES)]
    max_submeshes: usize,

    /// Skip looking up texture files.
    #[arg(long)]
    no_textures: bool,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let options = ImportOptions::default()
        .with_limits(Limits::default().with_max_submeshes(args.max_submeshes))
        .with_resolve_textures(!args.no_textures);
    let registry = Registry::default();

    let mut failed = false;
    for path in &args.files {
        match registry.read_file(path, &options) {
            Ok(scene) => {
                let summary = scene_json(path, &scene, args.first_slots);
                match serde_json::to_string_pretty(&summary) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("{}: {e}", path.display());
                        failed = true;
                    }
                }
            }
            Err(e) => {
                eprintln!("{e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn scene_json(path: &std::path::Path, scene: &Scene, first_slots: usize) -> serde_json::Value {
    serde_json::json!({
        "path": path.display().to_string(),
        "root": scene.root.name,
        "mesh_count": scene.mesh_count(),
        "face_count": scene.face_count(),
        "meshes": scene.meshes.iter().enumerate().map(|(i, m)| {
            serde_json::json!({
                "index": i,
                "face_count": m.faces.len(),
                "slot_count": m.positions.len(),
                "triangle_count": m.triangle_count(),
                "quad_count": m.faces.iter().filter(|f| f.indices.len() == 4).count(),
                "materials": m.materials.iter().map(|mat| {
                    serde_json::json!({
                        "texture": mat.texture,
                        "path": mat.path.as_ref().map(|p| p.display().to_string()),
                    })
                }).collect::<Vec<_>>(),
                "first_slots": (0..m.positions.len().min(first_slots)).map(|s| {
                    serde_json::json!({
                        "position": m.positions[s].to_array(),
                        "normal": m.normals[s].to_array(),
                        "color": m.colors[s].to_array(),
                        "uv": m.uvs[s].to_array(),
                    })
                }).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>(),
    })
}
