//! Core rendering engine.
//!
//! The [`Engine`] owns the frame buffers, the scene and the mutable view state
//! (camera, light, render mode, wrap-around). Input arrives as [`Command`]s
//! applied between frames; [`Engine::render`] then redraws the whole frame in
//! the current [`RenderMode`].

use std::fmt;

use serde::Deserialize;

use crate::camera::{self, Camera, CameraController};
use crate::colors;
use crate::config::RenderConfig;
use crate::light::PointLight;
use crate::math::vec3::Vec3;
use crate::projection::Projector;
use crate::raytracer::RayTracer;
use crate::render::{Renderer, ScanlineRasterizer};
use crate::scene::Scene;

/// Rendering strategy for the whole frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum RenderMode {
    /// Triangle edges only (key: 1)
    #[default]
    Wireframe,
    /// Scan-converted fill, textured where the material has a texture (key: 2)
    Rasterized,
    /// One primary ray per pixel with hard shadows (key: 3)
    RayTraced,
}

impl RenderMode {
    /// The next mode in key order, wrapping back to wireframe.
    pub fn next(self) -> Self {
        match self {
            RenderMode::Wireframe => RenderMode::Rasterized,
            RenderMode::Rasterized => RenderMode::RayTraced,
            RenderMode::RayTraced => RenderMode::Wireframe,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Wireframe => write!(f, "Wireframe"),
            RenderMode::Rasterized => write!(f, "Rasterized"),
            RenderMode::RayTraced => write!(f, "RayTraced"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Forward,
    Back,
}

impl Direction {
    /// Unit vector along this direction; forward is -Z.
    pub fn unit(self) -> Vec3 {
        match self {
            Direction::Left => Vec3::new(-1.0, 0.0, 0.0),
            Direction::Right => Vec3::RIGHT,
            Direction::Up => Vec3::UP,
            Direction::Down => Vec3::new(0.0, -1.0, 0.0),
            Direction::Forward => Vec3::FORWARD,
            Direction::Back => Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// A single state change requested by input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Translate the camera along its own axes.
    MoveCamera(Direction),
    /// Tilt (up/down) or pan (left/right) the camera.
    Rotate(Direction),
    ResetCamera,
    SetMode(RenderMode),
    CycleMode,
    /// Translate the light along world axes. Ignored outside ray tracing.
    MoveLight(Direction),
    /// Orbit around the look target, then face it.
    Orbit(Direction),
    /// Swing over or under the look target about the X axis, then face it.
    /// Only `Up` and `Down` have an effect.
    VerticalOrbit(Direction),
    LookAtTarget,
    ToggleWrapAround,
}

pub struct Engine {
    renderer: Renderer,
    rasterizer: ScanlineRasterizer,
    ray_tracer: RayTracer,
    projector: Projector,
    scene: Scene,
    camera: Camera,
    light: PointLight,
    render_mode: RenderMode,
    wrap_around: bool,
    controller: CameraController,
    home: Vec3,
    target: Vec3,
}

impl Engine {
    pub fn new(scene: Scene, config: &RenderConfig) -> Self {
        let home = config.camera_position();
        let target = config.look_target();
        Self {
            renderer: Renderer::new(config.width, config.height),
            rasterizer: ScanlineRasterizer::new(),
            ray_tracer: RayTracer::new(config.ray_fov_degrees, config.lighting),
            projector: Projector::new(
                config.focal_length,
                config.canvas_width,
                config.canvas_height,
                config.width,
                config.height,
            ),
            scene,
            camera: Camera::looking_at(home, target),
            light: PointLight::new(config.light_position()),
            render_mode: config.initial_mode,
            wrap_around: config.wrap_around,
            controller: config.controller(),
            home,
            target,
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn light(&self) -> &PointLight {
        &self.light
    }

    pub fn wrap_around(&self) -> bool {
        self.wrap_around
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn width(&self) -> u32 {
        self.renderer.width()
    }

    pub fn height(&self) -> u32 {
        self.renderer.height()
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    /// ARGB color of one rendered pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.renderer.pixel(x, y)
    }

    /// Applies one input command to the view state.
    pub fn apply(&mut self, command: Command) {
        log::debug!("Command: {command:?}");
        match command {
            Command::MoveCamera(direction) => {
                let step = direction.unit() * self.controller.translation_step;
                let delta = self.camera.to_world_direction(step);
                self.camera.position = camera::translate(delta, self.camera.position);
            }
            Command::Rotate(direction) => {
                let step = self.controller.rotation_step;
                let orientation = self.camera.orientation;
                self.camera.orientation = match direction {
                    Direction::Up => camera::tilt(step, orientation),
                    Direction::Down => camera::tilt(-step, orientation),
                    Direction::Left => camera::pan(step, orientation),
                    Direction::Right => camera::pan(-step, orientation),
                    Direction::Forward | Direction::Back => orientation,
                };
            }
            Command::ResetCamera => {
                self.camera = Camera::looking_at(self.home, self.target);
            }
            Command::SetMode(mode) => self.set_render_mode(mode),
            Command::CycleMode => self.set_render_mode(self.render_mode.next()),
            Command::MoveLight(direction) => {
                if self.render_mode == RenderMode::RayTraced {
                    let delta = direction.unit() * self.controller.translation_step;
                    self.light = self.light.translated(delta);
                    log::debug!("Light at {:?}", self.light.position);
                }
            }
            Command::Orbit(direction) => {
                let step = self.controller.orbit_step;
                let (pan, tilt) = match direction {
                    Direction::Left => (-step, 0.0),
                    Direction::Right => (step, 0.0),
                    Direction::Up => (0.0, -step),
                    Direction::Down => (0.0, step),
                    Direction::Forward | Direction::Back => (0.0, 0.0),
                };
                self.camera.position = camera::orbit(pan, tilt, self.camera.position, self.target);
                self.camera.orientation = camera::look_at(self.camera.position, self.target);
            }
            Command::VerticalOrbit(direction) => {
                let step = self.controller.orbit_step;
                let degrees = match direction {
                    Direction::Up => -step,
                    Direction::Down => step,
                    _ => 0.0,
                };
                self.camera.position =
                    camera::vertical_orbit(degrees, self.camera.position, self.target);
                self.camera.orientation = camera::look_at(self.camera.position, self.target);
            }
            Command::LookAtTarget => {
                self.camera.orientation = camera::look_at(self.camera.position, self.target);
            }
            Command::ToggleWrapAround => {
                self.wrap_around = !self.wrap_around;
                log::info!("Wrap-around {}", if self.wrap_around { "on" } else { "off" });
            }
        }
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        if mode != self.render_mode {
            log::info!("Render mode: {mode}");
        }
        self.render_mode = mode;
    }

    /// Render the current frame
    pub fn render(&mut self) {
        self.renderer.clear(colors::BACKGROUND);
        self.renderer.clear_depth();

        let mut fb = self.renderer.as_framebuffer(self.wrap_around);
        match self.render_mode {
            RenderMode::Wireframe | RenderMode::Rasterized => {
                let mut skipped = 0usize;
                for object in self.scene.objects() {
                    let texture = match self.render_mode {
                        RenderMode::Rasterized => object.material.texture(),
                        _ => None,
                    };
                    for triangle in &object.triangles {
                        let Some(projected) =
                            self.projector.project_triangle(&self.camera, triangle, texture)
                        else {
                            skipped += 1;
                            continue;
                        };
                        match (self.render_mode, texture) {
                            (RenderMode::Wireframe, _) => {
                                self.rasterizer.stroke_triangle(&projected, &mut fb)
                            }
                            (_, Some(texture)) if triangle.texture_coords.is_some() => self
                                .rasterizer
                                .texture_triangle(&projected, texture, &mut fb),
                            _ => self.rasterizer.fill_triangle(&projected, &mut fb),
                        }
                    }
                }
                if skipped > 0 {
                    log::trace!("Skipped {skipped} triangles behind the camera");
                }
            }
            RenderMode::RayTraced => {
                self.ray_tracer
                    .render(&self.scene, &self.camera, &self.light, &mut fb);
            }
        }
    }
}
