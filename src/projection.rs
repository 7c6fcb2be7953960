//! Pinhole projection from world space onto the pixel canvas.
//!
//! The [`Projector`] is the single source of truth for projection parameters
//! (focal length, virtual canvas size, output image size).
//!
//! # Depth convention
//!
//! Cameras look down -Z, so every visible vertex has a negative camera-space
//! `z`. The stored depth is `1 / z`, which is negative and *decreases* as a
//! surface gets nearer. Depth tests therefore keep the **smaller** value, and
//! the depth buffer is cleared to `+inf`.

use crate::camera::Camera;
use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::scene::Triangle;
use crate::texture::Texture;

/// Vertices closer to the camera plane than this (or behind it) are rejected.
pub const NEAR_EPSILON: f32 = 1e-4;

/// A projected vertex in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
    /// `1 / camera_z`; smaller is nearer.
    pub depth: f32,
    /// Texture coordinates in texel units, when the surface is textured.
    pub texture_point: Option<Vec2>,
    pub brightness: f32,
}

impl CanvasPoint {
    pub fn new(x: f32, y: f32, depth: f32) -> Self {
        Self {
            x,
            y,
            depth,
            texture_point: None,
            brightness: 1.0,
        }
    }

    pub fn with_texture_point(mut self, texture_point: Vec2) -> Self {
        self.texture_point = Some(texture_point);
        self
    }

    /// Interpolates every attribute: `self` at `t = 0`, `other` at `t = 1`.
    #[inline]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            x: mix(self.x, other.x),
            y: mix(self.y, other.y),
            depth: mix(self.depth, other.depth),
            texture_point: match (self.texture_point, other.texture_point) {
                (Some(a), Some(b)) => Some(a.lerp(b, t)),
                _ => None,
            },
            brightness: mix(self.brightness, other.brightness),
        }
    }
}

/// A triangle in pixel space, ready for rasterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTriangle {
    pub vertices: [CanvasPoint; 3],
    pub color: Color,
}

impl CanvasTriangle {
    pub fn new(vertices: [CanvasPoint; 3], color: Color) -> Self {
        Self { vertices, color }
    }
}

/// Pinhole projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    /// Distance to the image plane. Negative, matching the -Z view axis.
    focal_length: f32,
    /// Width of the virtual canvas in image-plane units.
    canvas_width: f32,
    /// Height of the virtual canvas in image-plane units.
    canvas_height: f32,
    image_width: u32,
    image_height: u32,
}

impl Projector {
    pub fn new(
        focal_length: f32,
        canvas_width: f32,
        canvas_height: f32,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        Self {
            focal_length,
            canvas_width,
            canvas_height,
            image_width,
            image_height,
        }
    }

    /// Projects a world-space point to pixel coordinates.
    ///
    /// Returns `None` when the point is on or behind the camera plane, where
    /// the perspective divide is singular or mirrors the point.
    pub fn project_point(&self, camera: &Camera, point: Vec3) -> Option<CanvasPoint> {
        let local = camera.to_camera_space(point);
        if local.z >= -NEAR_EPSILON {
            return None;
        }

        let screen_x = self.focal_length * (local.x / local.z);
        let screen_y = self.focal_length * (local.y / local.z);

        let normal_x = (screen_x + self.canvas_width / 2.0) / self.canvas_width;
        let normal_y = (screen_y + self.canvas_height / 2.0) / self.canvas_height;

        // Row 0 is the top of the image
        let x = (normal_x * self.image_width as f32).floor();
        let y = ((1.0 - normal_y) * self.image_height as f32).floor();

        Some(CanvasPoint::new(x, y, 1.0 / local.z))
    }

    /// Projects all three vertices of a triangle.
    ///
    /// When `texture` is given and the triangle has texture coordinates, they
    /// are attached to the projected vertices in texel units. Any vertex
    /// failing [`Projector::project_point`] drops the whole triangle.
    pub fn project_triangle(
        &self,
        camera: &Camera,
        triangle: &Triangle,
        texture: Option<&Texture>,
    ) -> Option<CanvasTriangle> {
        let mut vertices = [CanvasPoint::new(0.0, 0.0, 0.0); 3];
        for (i, vertex) in triangle.vertices.iter().enumerate() {
            let mut point = self.project_point(camera, *vertex)?;
            if let (Some(texture), Some(coords)) = (texture, triangle.texture_coords) {
                point = point.with_texture_point(Vec2::new(
                    coords[i].x * texture.width() as f32,
                    coords[i].y * texture.height() as f32,
                ));
            }
            vertices[i] = point;
        }
        Some(CanvasTriangle::new(vertices, triangle.color))
    }
}
