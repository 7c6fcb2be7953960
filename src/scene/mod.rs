//! Static scene description: triangles grouped into objects with materials.
//!
//! A [`Scene`] is built once (usually by [`loader::load_scene`]) and is
//! read-only for the rest of the program. Every render mode walks the same
//! object list in the same order.

pub mod loader;

use std::sync::Arc;

pub use loader::{load_scene, LoadError};

use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// A world-space triangle with a flat color and optional texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub color: Color,
    /// Normalized [0, 1] texture coordinates, one per vertex.
    pub texture_coords: Option<[Vec2; 3]>,
}

impl Triangle {
    pub fn new(vertices: [Vec3; 3], color: Color) -> Self {
        Self {
            vertices,
            color,
            texture_coords: None,
        }
    }

    pub fn with_texture_coords(mut self, texture_coords: [Vec2; 3]) -> Self {
        self.texture_coords = Some(texture_coords);
        self
    }

    /// The two edges sharing vertex 0: `(v1 - v0, v2 - v0)`.
    #[inline]
    pub fn edges(&self) -> (Vec3, Vec3) {
        (
            self.vertices[1] - self.vertices[0],
            self.vertices[2] - self.vertices[0],
        )
    }

    /// Unit face normal. Its direction follows the vertex winding.
    pub fn normal(&self) -> Vec3 {
        let (e0, e1) = self.edges();
        e0.cross(e1).normalize()
    }
}

/// Surface appearance shared by every triangle of an object.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Flat(Color),
    Textured {
        texture: Arc<Texture>,
        /// Used for wireframe edges and for triangles without texture
        /// coordinates.
        color: Color,
    },
}

impl Material {
    pub fn color(&self) -> Color {
        match self {
            Material::Flat(color) => *color,
            Material::Textured { color, .. } => *color,
        }
    }

    pub fn texture(&self) -> Option<&Texture> {
        match self {
            Material::Flat(_) => None,
            Material::Textured { texture, .. } => Some(texture.as_ref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub material: Material,
    pub triangles: Vec<Triangle>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, material: Material, triangles: Vec<Triangle>) -> Self {
        Self {
            name: name.into(),
            material,
            triangles,
        }
    }
}

/// An ordered, immutable list of scene objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self { objects }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.triangles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }
}
