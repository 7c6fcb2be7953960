//! Owning color and depth buffers.
//!
//! The [`Renderer`] owns the frame's pixel storage; drawing goes through the
//! borrowed [`FrameBuffer`] view it hands out.

use super::framebuffer::FrameBuffer;
use crate::colors;

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![f32::INFINITY; size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Resets every depth to `+inf` (nothing drawn yet).
    #[inline]
    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
    }

    /// Color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.color_buffer[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// The color buffer as raw ARGB8888 bytes, for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and u8 has alignment 1, so the slice
        // covers exactly the initialized color buffer.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self, wrap_around: bool) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
        .with_wrap_around(wrap_around)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_color_and_depth() {
        let mut renderer = Renderer::new(3, 2);
        renderer
            .as_framebuffer(false)
            .set_pixel_with_depth(1, 1, -1.0, 0xFFFFFFFF);
        assert_eq!(renderer.pixel(1, 1), Some(0xFFFFFFFF));

        renderer.clear(colors::BACKGROUND);
        renderer.clear_depth();
        assert_eq!(renderer.pixel(1, 1), Some(colors::BACKGROUND));
        assert_eq!(renderer.as_framebuffer(false).depth_at(1, 1), Some(f32::INFINITY));
    }

    #[test]
    fn bytes_cover_whole_buffer() {
        let renderer = Renderer::new(4, 4);
        assert_eq!(renderer.as_bytes().len(), 64);
        assert_eq!(renderer.pixel(4, 0), None);
    }
}
