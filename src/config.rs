//! Runtime configuration, optionally read from a RON file.
//!
//! Every field has a default, so a config file only needs to name the values
//! it overrides:
//!
//! ```ron
//! (
//!     width: 800,
//!     height: 600,
//!     initial_mode: RayTraced,
//!     lighting: (shininess: 4.0),
//! )
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::camera::CameraController;
use crate::engine::RenderMode;
use crate::math::vec3::Vec3;
use crate::raytracer::Lighting;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output image width in pixels.
    pub width: u32,
    /// Output image height in pixels.
    pub height: u32,
    pub focal_length: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub camera_position: [f32; 3],
    /// Point the camera faces on start-up and reset, and the orbit centre.
    pub look_target: [f32; 3],
    pub light_position: [f32; 3],
    pub translation_step: f32,
    pub rotation_step: f32,
    pub orbit_step: f32,
    /// Horizontal field of view of the ray tracer, in degrees.
    pub ray_fov_degrees: f32,
    /// Uniform scale applied to every loaded vertex.
    pub scale: f32,
    pub wrap_around: bool,
    pub initial_mode: RenderMode,
    pub lighting: Lighting,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            focal_length: -50.0,
            canvas_width: 40.0,
            canvas_height: 30.0,
            camera_position: [0.0, 2.5, 10.0],
            look_target: [0.0, 2.5, 0.0],
            light_position: [-0.2, 5.0, -4.0],
            translation_step: 0.1,
            rotation_step: 1.0,
            orbit_step: 3.0,
            ray_fov_degrees: 45.0,
            scale: 1.0,
            wrap_around: false,
            initial_mode: RenderMode::default(),
            lighting: Lighting::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "image size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        // The camera looks down -Z, so the image plane sits at a negative z
        if self.focal_length.is_nan() || self.focal_length >= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "focal_length {} must be negative",
                self.focal_length
            )));
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(ConfigError::Invalid("canvas size must be positive".into()));
        }
        if !(self.ray_fov_degrees > 0.0 && self.ray_fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "ray_fov_degrees {} must be in (0, 180)",
                self.ray_fov_degrees
            )));
        }
        Ok(())
    }

    pub fn camera_position(&self) -> Vec3 {
        Vec3::from_array(self.camera_position)
    }

    pub fn look_target(&self) -> Vec3 {
        Vec3::from_array(self.look_target)
    }

    pub fn light_position(&self) -> Vec3 {
        Vec3::from_array(self.light_position)
    }

    pub fn controller(&self) -> CameraController {
        CameraController {
            translation_step: self.translation_step,
            rotation_step: self.rotation_step,
            orbit_step: self.orbit_step,
        }
    }
}
