//! Point-light shading with inverse-square falloff and hard shadows.

use std::f32::consts::PI;

use serde::Deserialize;

use super::intersection::{closest_intersection, Intersection};
use super::Ray;
use crate::colors::Color;
use crate::light::PointLight;
use crate::math::vec3::Vec3;
use crate::scene::Scene;

/// Lighting model constants.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Lighting {
    /// Power of the point light before inverse-square falloff.
    pub radiant_intensity: f32,
    pub shininess: f32,
    /// Lower bound for lit (unshadowed) surfaces.
    pub ambient_floor: f32,
    /// Brightness of a surface that cannot see the light.
    pub shadow_brightness: f32,
    /// Lights at or within this distance of a surface never cast its shadow.
    pub shadow_min_distance: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            radiant_intensity: 400.0,
            shininess: 1.0,
            ambient_floor: 0.2,
            shadow_brightness: 0.1,
            shadow_min_distance: 1.0,
        }
    }
}

impl Lighting {
    /// Final brightness multiplier for a surface hit seen from `eye`.
    pub fn shade(&self, scene: &Scene, hit: &Intersection, light: &PointLight, eye: Vec3) -> f32 {
        if self.in_shadow(scene, hit, light) {
            self.shadow_brightness
        } else {
            self.direct(hit, light, eye)
        }
    }

    /// Diffuse times specular, clamped to `[ambient_floor, 1]`.
    pub fn direct(&self, hit: &Intersection, light: &PointLight, eye: Vec3) -> f32 {
        let normal = hit.triangle.normal();
        let to_light = light.offset_from(hit.point);
        let distance = to_light.magnitude();
        let to_light = to_light.normalize();

        let diffuse =
            self.radiant_intensity * normal.dot(to_light).max(0.0) / (4.0 * PI * distance * distance);

        let view = (eye - hit.point).normalize();
        let reflection = (-to_light).reflect(normal);
        let specular = view.dot(reflection).max(0.0).powf(self.shininess);

        let brightness = diffuse * specular;
        if brightness.is_nan() {
            self.ambient_floor
        } else {
            brightness.clamp(self.ambient_floor, 1.0)
        }
    }

    /// Whether another object sits between the hit point and the light.
    ///
    /// The shaded object itself is excluded from the search.
    pub fn in_shadow(&self, scene: &Scene, hit: &Intersection, light: &PointLight) -> bool {
        let to_light = light.offset_from(hit.point);
        let light_distance = to_light.magnitude();
        if light_distance <= self.shadow_min_distance {
            return false;
        }

        let ray = Ray::new(hit.point, to_light.normalize());
        closest_intersection(scene, &ray, Some(hit.object_index))
            .is_some_and(|occluder| occluder.distance < light_distance)
    }
}

/// Base color at a hit: the texture sample for textured objects whose
/// triangle carries texture coordinates, otherwise the triangle color.
pub fn surface_color(hit: &Intersection) -> Color {
    match (hit.object.material.texture(), hit.texture_coords()) {
        (Some(texture), Some(coords)) => texture.sample(coords.x, coords.y),
        _ => hit.triangle.color,
    }
}
