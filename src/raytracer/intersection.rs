//! Ray-triangle intersection by direct solution of the barycentric system.

use super::Ray;
use crate::math::mat3::Mat3;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::scene::{Scene, SceneObject, Triangle};

/// Solution of one ray-triangle test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter; a distance when the ray direction is normalized.
    pub t: f32,
    /// Weight of `v1 - v0`.
    pub u: f32,
    /// Weight of `v2 - v0`.
    pub v: f32,
}

/// The closest hit of a ray against a whole scene.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    pub point: Vec3,
    pub distance: f32,
    pub u: f32,
    pub v: f32,
    pub triangle: &'a Triangle,
    pub object: &'a SceneObject,
    pub object_index: usize,
}

impl Intersection<'_> {
    /// Texture coordinates at the hit, interpolated from the triangle's
    /// per-vertex coordinates. Normalized [0, 1].
    pub fn texture_coords(&self) -> Option<Vec2> {
        self.triangle.texture_coords.map(|[t0, t1, t2]| {
            t0 + (t1 - t0) * self.u + (t2 - t0) * self.v
        })
    }
}

/// Intersects `ray` with `triangle`.
///
/// Solves `[-d, e0, e1] * [t, u, v]^T = origin - v0` where `e0 = v1 - v0` and
/// `e1 = v2 - v0`. The hit is valid when `t >= 0`, `u >= 0`, `v >= 0` and
/// `u + v <= 1` (edges inclusive). A singular system (ray parallel to the
/// triangle plane, or a degenerate triangle) is a miss.
pub fn intersect_triangle(ray: &Ray, triangle: &Triangle) -> Option<RayHit> {
    let (e0, e1) = triangle.edges();
    let system = Mat3::from_columns(-ray.direction, e0, e1);
    let solution = system.inverse()? * (ray.origin - triangle.vertices[0]);
    let (t, u, v) = (solution.x, solution.y, solution.z);

    if t >= 0.0 && u >= 0.0 && v >= 0.0 && u + v <= 1.0 {
        Some(RayHit { t, u, v })
    } else {
        None
    }
}

/// Finds the hit with the smallest `t` over every triangle in the scene,
/// skipping the object at index `exclude` if given.
pub fn closest_intersection<'a>(
    scene: &'a Scene,
    ray: &Ray,
    exclude: Option<usize>,
) -> Option<Intersection<'a>> {
    let mut closest: Option<Intersection<'a>> = None;

    for (object_index, object) in scene.objects().iter().enumerate() {
        if exclude == Some(object_index) {
            continue;
        }
        for triangle in &object.triangles {
            let Some(hit) = intersect_triangle(ray, triangle) else {
                continue;
            };
            if closest.as_ref().is_some_and(|c| hit.t >= c.distance) {
                continue;
            }
            closest = Some(Intersection {
                point: ray.at(hit.t),
                distance: hit.t,
                u: hit.u,
                v: hit.v,
                triangle,
                object,
                object_index,
            });
        }
    }

    closest
}
