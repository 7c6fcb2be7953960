//! Camera rig: position, orientation and the moves that update them.
//!
//! # Coordinate System
//!
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer; the camera looks down its local **-Z** axis
//!
//! # Orientation
//!
//! Orientation is a [`Mat3`] that maps a world-space offset (`point - position`)
//! into camera space. It starts as the identity and is updated only by
//! left-multiplying rotations onto it, so its transpose maps camera-space
//! directions back into the world.
//!
//! The free functions in this module are pure: they take the current value and
//! return the new one, leaving the caller to store it.

use crate::math::mat3::Mat3;
use crate::math::vec3::Vec3;

/// Position and orientation of the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Mat3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Creates a camera at `position` looking along -Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            orientation: Mat3::identity(),
        }
    }

    /// Creates a camera at `position` facing `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            orientation: look_at(position, target),
        }
    }

    /// Maps a world-space point into camera space.
    #[inline]
    pub fn to_camera_space(&self, point: Vec3) -> Vec3 {
        self.orientation * (point - self.position)
    }

    /// Maps a camera-space direction into world space.
    #[inline]
    pub fn to_world_direction(&self, direction: Vec3) -> Vec3 {
        self.orientation.transpose() * direction
    }

    /// The world-space viewing direction (normalized).
    pub fn forward(&self) -> Vec3 {
        self.to_world_direction(Vec3::FORWARD).normalize()
    }
}

/// Moves a position by `delta`.
pub fn translate(delta: Vec3, position: Vec3) -> Vec3 {
    position + delta
}

/// Pitches the view about the camera's X axis. Positive degrees look up.
pub fn tilt(degrees: f32, orientation: Mat3) -> Mat3 {
    Mat3::rotation_x(degrees.to_radians()) * orientation
}

/// Yaws the view about the Y axis. Positive degrees turn left.
pub fn pan(degrees: f32, orientation: Mat3) -> Mat3 {
    Mat3::rotation_y(degrees.to_radians()) * orientation
}

/// Moves `position` across the sphere centred on `target`.
///
/// The offset from the target is converted to spherical coordinates (radius,
/// polar angle measured from +Y, azimuth measured from +Z toward +X), the
/// deltas are added and the result converted back. The radius is preserved.
/// A camera sitting exactly on the target has no defined direction and is
/// returned unchanged.
pub fn orbit(pan_degrees: f32, tilt_degrees: f32, position: Vec3, target: Vec3) -> Vec3 {
    let offset = position - target;
    let radius = offset.magnitude();
    if radius <= f32::EPSILON {
        return position;
    }

    let horizontal = (offset.x * offset.x + offset.z * offset.z).sqrt();
    let phi = offset.x.atan2(offset.z) + pan_degrees.to_radians();
    let theta = horizontal.atan2(offset.y) + tilt_degrees.to_radians();

    target
        + Vec3::new(
            radius * theta.sin() * phi.sin(),
            radius * theta.cos(),
            radius * theta.sin() * phi.cos(),
        )
}

/// Rotates `position` about the line through `target` parallel to the X axis.
///
/// Unlike [`orbit`] this is a plain rotation, so the camera can swing over
/// the top of the target. Positive angles move a camera in front of the
/// target (+Z side) downward.
pub fn vertical_orbit(degrees: f32, position: Vec3, target: Vec3) -> Vec3 {
    let offset = position - target;
    let (sin, cos) = degrees.to_radians().sin_cos();
    target
        + Vec3::new(
            offset.x,
            offset.y * cos - offset.z * sin,
            offset.y * sin + offset.z * cos,
        )
}

/// Builds an orientation whose forward axis points from `position` at `target`.
///
/// Pan is derived with `atan2` on the horizontal offset, so crossing behind
/// the target (or sitting level with it on the Z axis) never flips the view.
/// Tilt is applied after pan.
pub fn look_at(position: Vec3, target: Vec3) -> Mat3 {
    let offset = position - target;
    let horizontal = (offset.x * offset.x + offset.z * offset.z).sqrt();

    let pan_degrees = offset.x.atan2(offset.z).to_degrees();
    let tilt_degrees = -offset.y.atan2(horizontal).to_degrees();

    tilt(tilt_degrees, pan(pan_degrees, Mat3::identity()))
}

/// Step sizes applied per input command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraController {
    /// World units per translation command.
    pub translation_step: f32,
    /// Degrees per tilt/pan command.
    pub rotation_step: f32,
    /// Degrees per orbit command.
    pub orbit_step: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            translation_step: 0.1,
            rotation_step: 1.0,
            orbit_step: 3.0,
        }
    }
}
