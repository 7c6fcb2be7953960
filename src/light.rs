//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A point light radiating equally in all directions from `position`.
///
/// Only the ray tracer consumes it; intensity falls off with the inverse
/// square of the distance (see [`crate::raytracer::Lighting`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Returns the light moved by `delta`.
    pub fn translated(self, delta: Vec3) -> Self {
        Self::new(self.position + delta)
    }

    /// Unnormalized vector from `point` to the light.
    #[inline]
    pub fn offset_from(&self, point: Vec3) -> Vec3 {
        self.position - point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translated_moves_position() {
        let light = PointLight::new(Vec3::new(-0.2, 5.0, -4.0));
        let moved = light.translated(Vec3::new(0.1, 0.0, 0.0));
        assert!((moved.position.x + 0.1).abs() < 1e-6);
        assert_eq!(moved.position.y, 5.0);
    }

    #[test]
    fn offset_points_toward_light() {
        let light = PointLight::new(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(light.offset_from(Vec3::ZERO), Vec3::new(0.0, 5.0, 0.0));
    }
}
