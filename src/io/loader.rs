use crate::error::{Error, Result};
use crate::scene::mesh::Mesh;
use crate::scene::node::SceneNode;
use log::{info, warn};
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Model formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Obj,
    Stl,
    Gltf,
    Glb,
    Ply,
}

impl ModelFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "obj" => Some(Self::Obj),
            "stl" => Some(Self::Stl),
            "gltf" => Some(Self::Gltf),
            "glb" => Some(Self::Glb),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }
}

fn detect(name: &str) -> Result<ModelFormat> {
    match ModelFormat::from_path(Path::new(name)) {
        Some(ModelFormat::Obj) => Ok(ModelFormat::Obj),
        Some(other) => Err(Error::UnsupportedFormat(format!(
            "{:?} ({})",
            other, name
        ))),
        None => Err(Error::UnsupportedFormat(name.to_string())),
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

/// Loads a model file into a group node with one child per OBJ object.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<SceneNode> {
    let path = path.as_ref();
    let name = path.display().to_string();
    detect(&name)?;

    info!("Loading OBJ file: {}", name);
    // Materials are irrelevant to framing; a missing .mtl is not an error.
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    build_group(&name, models)
}

/// Same as [`load_model`] for a model already in memory, e.g. a file picked
/// in a browser. `name` only drives format detection and node naming.
pub fn load_model_from_bytes(name: &str, bytes: &[u8]) -> Result<SceneNode> {
    detect(name)?;

    info!("Loading OBJ data: {} ({} bytes)", name, bytes.len());
    let mut reader = BufReader::new(Cursor::new(bytes));
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    build_group(name, models)
}

fn build_group(name: &str, models: Vec<tobj::Model>) -> Result<SceneNode> {
    let mut group = SceneNode::new(name);
    for model in models {
        let mesh = model.mesh;
        if mesh.positions.is_empty() {
            warn!("Skipping OBJ object '{}' with no vertices", model.name);
            continue;
        }
        let child = SceneNode::with_mesh(model.name, Mesh::from_flat(&mesh.positions, mesh.indices));
        group.add_child(child);
    }

    if group.children.is_empty() {
        return Err(Error::EmptyModel(name.to_string()));
    }

    info!(
        "Loaded '{}': {} object(s), {} vertices, {} triangles",
        name,
        group.children.len(),
        group.vertex_count(),
        group.triangle_count()
    );
    Ok(group)
}
