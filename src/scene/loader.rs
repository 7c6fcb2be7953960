//! Wavefront OBJ/MTL scene loading.
//!
//! Parsing is delegated to `tobj`; this module turns its flat index buffers
//! into [`SceneObject`]s, resolves materials (flat `Kd` colors or `map_Kd`
//! textures) and reports failures as a [`LoadError`] whose category maps to a
//! distinct process exit code.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::{Material, Scene, SceneObject, Triangle};
use crate::colors::{Color, MISSING_MATERIAL};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// Error type for scene, material and texture loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("bad header in {}: {reason}", path.display())]
    BadHeader { path: PathBuf, reason: String },

    #[error("truncated data in {}", path.display())]
    TruncatedData { path: PathBuf },

    #[error("failed to parse {}: {source}", path.display())]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("failed to load materials for {}: {source}", path.display())]
    Material {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("{} contains no triangles", path.display())]
    EmptyScene { path: PathBuf },
}

impl LoadError {
    /// Process exit code for this failure category.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } => 2,
            LoadError::BadHeader { .. } => 3,
            LoadError::TruncatedData { .. } => 4,
            LoadError::Obj { .. } => 5,
            LoadError::Material { .. } => 6,
            LoadError::EmptyScene { .. } => 7,
        }
    }
}

/// Loads every object in an OBJ file, scaling vertex positions by `scale`.
///
/// Texture paths in the material library are resolved relative to the OBJ
/// file's directory. An object whose material cannot be resolved is kept and
/// drawn in [`MISSING_MATERIAL`].
pub fn load_scene<P: AsRef<Path>>(path: P, scale: f32) -> Result<Scene, LoadError> {
    let path = path.as_ref();
    let options = tobj::LoadOptions {
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    };

    let (models, materials) = tobj::load_obj(path, &options).map_err(|source| match source {
        tobj::LoadError::OpenFileFailed => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        source => LoadError::Obj {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let materials = materials.map_err(|source| LoadError::Material {
        path: path.to_path_buf(),
        source,
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut textures: HashMap<String, Arc<Texture>> = HashMap::new();
    let mut objects = Vec::with_capacity(models.len());

    for model in &models {
        let material = resolve_material(&model.name, model.mesh.material_id, &materials)
            .map(|m| build_material(m, base_dir, &mut textures))
            .transpose()?
            .unwrap_or(Material::Flat(MISSING_MATERIAL));
        let triangles = build_triangles(&model.mesh, material.color(), scale);
        log::debug!(
            "Object '{}': {} triangles",
            model.name,
            triangles.len()
        );
        objects.push(SceneObject::new(model.name.clone(), material, triangles));
    }

    let scene = Scene::new(objects);
    if scene.is_empty() {
        return Err(LoadError::EmptyScene {
            path: path.to_path_buf(),
        });
    }

    log::info!(
        "Loaded scene {}: {} objects, {} triangles",
        path.display(),
        scene.objects().len(),
        scene.triangle_count()
    );
    Ok(scene)
}

fn resolve_material<'a>(
    object_name: &str,
    material_id: Option<usize>,
    materials: &'a [tobj::Material],
) -> Option<&'a tobj::Material> {
    let material = material_id.and_then(|id| materials.get(id));
    if material.is_none() {
        log::warn!("Object '{object_name}' references an unknown material; using fallback color");
    }
    material
}

fn build_material(
    material: &tobj::Material,
    base_dir: &Path,
    textures: &mut HashMap<String, Arc<Texture>>,
) -> Result<Material, LoadError> {
    let color = match material.diffuse {
        Some([r, g, b]) => Color::from_unit(r, g, b),
        None if material.diffuse_texture.is_some() => Color::WHITE,
        None => {
            log::warn!("Material '{}' has no diffuse color", material.name);
            MISSING_MATERIAL
        }
    };

    let Some(file_name) = &material.diffuse_texture else {
        return Ok(Material::Flat(color));
    };

    let texture = match textures.get(file_name) {
        Some(texture) => Arc::clone(texture),
        None => {
            let texture = Arc::new(Texture::from_file(base_dir.join(file_name))?);
            textures.insert(file_name.clone(), Arc::clone(&texture));
            texture
        }
    };
    Ok(Material::Textured { texture, color })
}

fn build_triangles(mesh: &tobj::Mesh, color: Color, scale: f32) -> Vec<Triangle> {
    let position = |index: u32| {
        let i = index as usize * 3;
        Vec3::new(
            mesh.positions[i] * scale,
            mesh.positions[i + 1] * scale,
            mesh.positions[i + 2] * scale,
        )
    };
    let texcoord = |index: u32| {
        let i = index as usize * 2;
        Vec2::new(mesh.texcoords[i], mesh.texcoords[i + 1])
    };
    let has_texcoords =
        !mesh.texcoords.is_empty() && mesh.texcoord_indices.len() == mesh.indices.len();

    mesh.indices
        .chunks_exact(3)
        .enumerate()
        .map(|(face, idx)| {
            let triangle = Triangle::new([position(idx[0]), position(idx[1]), position(idx[2])], color);
            if has_texcoords {
                let t = &mesh.texcoord_indices[face * 3..face * 3 + 3];
                triangle.with_texture_coords([texcoord(t[0]), texcoord(t[1]), texcoord(t[2])])
            } else {
                triangle
            }
        })
        .collect()
}
