//! Brute-force ray tracing with hard shadows.
//!
//! One primary ray per pixel is tested against every triangle in the scene;
//! the closest hit is shaded by [`Lighting`] and written to the frame buffer.
//! Pixels whose ray hits nothing keep the frame's clear color.

pub mod intersection;
pub mod shading;

pub use intersection::{closest_intersection, intersect_triangle, Intersection, RayHit};
pub use shading::{surface_color, Lighting};

use crate::camera::Camera;
use crate::light::PointLight;
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;
use crate::scene::Scene;

/// A half-line `origin + t * direction`, `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Builds the primary ray through pixel (`x`, `y`).
///
/// The image plane sits at the distance that makes the image width span
/// `fov_degrees` horizontally. Pixel rows grow downward, camera Y upward.
pub fn primary_ray(x: f32, y: f32, width: u32, height: u32, fov_degrees: f32, camera: &Camera) -> Ray {
    let half_width = width as f32 / 2.0;
    let half_height = height as f32 / 2.0;
    let plane_distance = half_width / (fov_degrees.to_radians() / 2.0).tan();

    let local = Vec3::new(x - half_width, -(y - half_height), -plane_distance);
    Ray::new(camera.position, camera.to_world_direction(local).normalize())
}

/// Per-pixel ray tracer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayTracer {
    fov_degrees: f32,
    lighting: Lighting,
}

impl Default for RayTracer {
    fn default() -> Self {
        Self::new(45.0, Lighting::default())
    }
}

impl RayTracer {
    pub fn new(fov_degrees: f32, lighting: Lighting) -> Self {
        Self {
            fov_degrees,
            lighting,
        }
    }

    /// Traces one ray, returning the ARGB color of its closest hit or `None`
    /// on a miss.
    pub fn trace(&self, scene: &Scene, camera: &Camera, light: &PointLight, ray: &Ray) -> Option<u32> {
        let hit = closest_intersection(scene, ray, None)?;
        let brightness = self.lighting.shade(scene, &hit, light, camera.position);
        Some(surface_color(&hit).to_argb(brightness))
    }

    /// Traces every pixel of `buffer`.
    pub fn render(
        &self,
        scene: &Scene,
        camera: &Camera,
        light: &PointLight,
        buffer: &mut FrameBuffer,
    ) {
        let (width, height) = (buffer.width(), buffer.height());
        let mut hits = 0usize;
        for y in 0..height {
            for x in 0..width {
                let ray = primary_ray(x as f32, y as f32, width, height, self.fov_degrees, camera);
                if let Some(color) = self.trace(scene, camera, light, &ray) {
                    buffer.set_pixel(x as i32, y as i32, color);
                    hits += 1;
                }
            }
        }
        log::trace!("Ray traced {width}x{height}: {hits} pixels hit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Color, BACKGROUND};
    use crate::render::renderer::Renderer;
    use crate::scene::{Material, SceneObject, Triangle};
    use approx::assert_relative_eq;

    #[test]
    fn centre_ray_points_forward() {
        let ray = primary_ray(320.0, 240.0, 640, 480, 45.0, &Camera::new(Vec3::ZERO));
        assert_relative_eq!(ray.direction.x, 0.0);
        assert_relative_eq!(ray.direction.y, 0.0);
        assert_relative_eq!(ray.direction.z, -1.0);
    }

    #[test]
    fn edge_rays_span_field_of_view() {
        let camera = Camera::new(Vec3::ZERO);
        let left = primary_ray(0.0, 240.0, 640, 480, 45.0, &camera);
        let right = primary_ray(640.0, 240.0, 640, 480, 45.0, &camera);
        let angle = left.direction.dot(right.direction).acos().to_degrees();
        assert_relative_eq!(angle, 45.0, epsilon = 1e-3);
        assert!(left.direction.x < 0.0);
    }

    #[test]
    fn top_rows_look_up() {
        let ray = primary_ray(320.0, 0.0, 640, 480, 45.0, &Camera::new(Vec3::ZERO));
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn rays_follow_camera_orientation() {
        let camera = Camera {
            position: Vec3::new(1.0, 2.0, 3.0),
            orientation: crate::camera::pan(90.0, crate::math::mat3::Mat3::identity()),
        };
        let ray = primary_ray(320.0, 240.0, 640, 480, 45.0, &camera);
        assert_eq!(ray.origin, camera.position);
        assert_relative_eq!(ray.direction.x, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn render_leaves_misses_untouched() {
        let scene = Scene::new(vec![SceneObject::new(
            "tri",
            Material::Flat(Color::new(0, 255, 0)),
            vec![Triangle::new(
                [
                    Vec3::new(-1.0, -1.0, -5.0),
                    Vec3::new(1.0, -1.0, -5.0),
                    Vec3::new(0.0, 1.0, -5.0),
                ],
                Color::new(0, 255, 0),
            )],
        )]);
        let mut renderer = Renderer::new(64, 48);
        RayTracer::default().render(
            &scene,
            &Camera::new(Vec3::ZERO),
            &PointLight::new(Vec3::new(0.0, 0.0, 0.0)),
            &mut renderer.as_framebuffer(false),
        );

        assert_eq!(renderer.pixel(0, 0), Some(BACKGROUND));
        let centre = renderer.pixel(32, 24).map(Color::from_argb);
        assert!(centre.is_some_and(|c| c.g > 0 && c.r == 0 && c.b == 0));
    }
}
