//! SDL2 window, keyboard input and frame presentation.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::engine::{Command, Direction, RenderMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Command(Command),
}

/// Maps a key press to an engine command.
///
/// | Keys | Command |
/// |------|---------|
/// | Arrows, F, B | move camera left/right/up/down/forward/back |
/// | W / S | tilt up / down |
/// | A / D | pan left / right |
/// | R | reset camera |
/// | 1 / 2 / 3 | wireframe / rasterized / ray traced |
/// | M | next render mode |
/// | 4 / 5 / 6 / 7 | move light left / right / forward / back |
/// | G / J / Y / H | orbit left / right / up / down |
/// | I / K | orbit over / under the target about X |
/// | T | look at target |
/// | P | toggle wrap-around |
pub fn map_key(key: Keycode) -> Option<Command> {
    let command = match key {
        Keycode::Left => Command::MoveCamera(Direction::Left),
        Keycode::Right => Command::MoveCamera(Direction::Right),
        Keycode::Up => Command::MoveCamera(Direction::Up),
        Keycode::Down => Command::MoveCamera(Direction::Down),
        Keycode::F => Command::MoveCamera(Direction::Forward),
        Keycode::B => Command::MoveCamera(Direction::Back),
        Keycode::W => Command::Rotate(Direction::Up),
        Keycode::S => Command::Rotate(Direction::Down),
        Keycode::A => Command::Rotate(Direction::Left),
        Keycode::D => Command::Rotate(Direction::Right),
        Keycode::R => Command::ResetCamera,
        Keycode::Num1 => Command::SetMode(RenderMode::Wireframe),
        Keycode::Num2 => Command::SetMode(RenderMode::Rasterized),
        Keycode::Num3 => Command::SetMode(RenderMode::RayTraced),
        Keycode::M => Command::CycleMode,
        Keycode::Num4 => Command::MoveLight(Direction::Left),
        Keycode::Num5 => Command::MoveLight(Direction::Right),
        Keycode::Num6 => Command::MoveLight(Direction::Forward),
        Keycode::Num7 => Command::MoveLight(Direction::Back),
        Keycode::G => Command::Orbit(Direction::Left),
        Keycode::J => Command::Orbit(Direction::Right),
        Keycode::Y => Command::Orbit(Direction::Up),
        Keycode::H => Command::Orbit(Direction::Down),
        Keycode::I => Command::VerticalOrbit(Direction::Up),
        Keycode::K => Command::VerticalOrbit(Direction::Down),
        Keycode::T => Command::LookAtTarget,
        Keycode::P => Command::ToggleWrapAround,
        _ => return None,
    };
    Some(command)
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before texture_creator so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    _texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first, so it is dropped before the creator.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            texture,
            _texture_creator: texture_creator,
            event_pump,
            width,
            height,
        })
    }

    /// Takes at most one pending event off the queue.
    pub fn poll_event(&mut self) -> WindowEvent {
        match self.event_pump.poll_event() {
            Some(Event::Quit { .. })
            | Some(Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            }) => WindowEvent::Quit,
            Some(Event::KeyDown {
                keycode: Some(key), ..
            }) => map_key(key).map_or(WindowEvent::None, WindowEvent::Command),
            _ => WindowEvent::None,
        }
    }

    /// Uploads an ARGB8888 frame and shows it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_keys_select_modes() {
        assert_eq!(
            map_key(Keycode::Num3),
            Some(Command::SetMode(RenderMode::RayTraced))
        );
        assert_eq!(map_key(Keycode::M), Some(Command::CycleMode));
    }

    #[test]
    fn orbit_and_light_keys() {
        assert_eq!(map_key(Keycode::G), Some(Command::Orbit(Direction::Left)));
        assert_eq!(map_key(Keycode::K), Some(Command::VerticalOrbit(Direction::Down)));
        assert_eq!(map_key(Keycode::Num6), Some(Command::MoveLight(Direction::Forward)));
        assert_eq!(map_key(Keycode::P), Some(Command::ToggleWrapAround));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(map_key(Keycode::Z), None);
    }
}
