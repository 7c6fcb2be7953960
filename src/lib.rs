//! A CPU-based software 3D renderer.
//!
//! A static triangulated scene is drawn in one of three modes: wireframe,
//! scan-converted fill (flat or affinely textured) with a depth buffer, or
//! brute-force ray tracing with a point light and hard shadows. SDL2 is used
//! only for window management and display. All rendering is done on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use prism::prelude::*;
//!
//! let config = RenderConfig::default();
//! let scene = load_scene("scene.obj", config.scale)?;
//! let mut engine = Engine::new(scene, &config);
//! let mut window = Window::new("prism", config.width, config.height)?;
//! engine.render();
//! window.present(engine.frame_buffer())?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod projection;
pub mod raytracer;
pub mod render;
pub mod scene;
pub mod texture;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use config::RenderConfig;
pub use engine::{Command, Direction, Engine, RenderMode};
pub use scene::{load_scene, LoadError, Scene};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use prism::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, CameraController};

    // Configuration
    pub use crate::config::{ConfigError, RenderConfig};

    // Engine
    pub use crate::engine::{Command, Direction, Engine, RenderMode};

    // Scene
    pub use crate::colors::Color;
    pub use crate::light::PointLight;
    pub use crate::scene::{load_scene, LoadError, Material, Scene, SceneObject, Triangle};
    pub use crate::texture::Texture;

    // Math
    pub use crate::math::mat3::Mat3;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Window & Input
    pub use crate::window::{Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::projection::{CanvasPoint, CanvasTriangle};
    pub use crate::raytracer::{closest_intersection, Ray};
    pub use crate::render::{FrameBuffer, Renderer, ScanlineRasterizer};
}
