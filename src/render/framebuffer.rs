//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a view into color and depth buffers with bounds handling. The
//! depth buffer enables hidden surface removal via the z-buffer algorithm.

/// How many buffer widths a wrapped shape may span.
const WRAP_EXTENT_FACTOR: f32 = 2.0;

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass buffers + dimensions together.
///
/// # Depth Buffer
///
/// The depth buffer stores `1 / z` of the camera-space position. Because the
/// camera looks down -Z these values are negative, and **smaller values are
/// closer**. A cleared buffer holds `+inf`.
///
/// # Wrap-around
///
/// When `wrap_around` is set, out-of-range coordinates are folded back onto
/// the buffer (`rem_euclid` on each axis) instead of being dropped. Shapes
/// wider or taller than [`FrameBuffer::wrap_extent`] are not drawn at all in
/// that mode.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
    wrap_around: bool,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            width as usize * height as usize,
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            width as usize * height as usize,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
            wrap_around: false,
        }
    }

    pub fn with_wrap_around(mut self, wrap_around: bool) -> Self {
        self.wrap_around = wrap_around;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn wrap_around(&self) -> bool {
        self.wrap_around
    }

    /// Largest extent, in pixels along either axis, that is drawn with
    /// wrap-around on.
    pub fn wrap_extent(&self) -> f32 {
        (self.width.max(self.height) as f32) * WRAP_EXTENT_FACTOR
    }

    /// Maps (x, y) to a buffer index, wrapping or rejecting out-of-range input.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (w, h) = (self.width as i32, self.height as i32);
        if w == 0 || h == 0 {
            return None;
        }
        let (x, y) = if self.wrap_around {
            (x.rem_euclid(w), y.rem_euclid(h))
        } else if x >= 0 && x < w && y >= 0 && y < h {
            (x, y)
        } else {
            return None;
        };
        Some(y as usize * w as usize + x as usize)
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if `depth` is strictly less than the stored
    /// depth (closer to the camera). Returns whether the write happened.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: u32) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.color_buffer[idx] = color;
            true
        } else {
            false
        }
    }

    /// Set a pixel without depth testing.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffers(width: u32, height: u32) -> (Vec<u32>, Vec<f32>) {
        let size = width as usize * height as usize;
        (vec![0; size], vec![f32::INFINITY; size])
    }

    #[test]
    fn nearer_depth_wins() {
        let (mut color, mut depth) = buffers(4, 4);
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 4, 4);
        assert!(fb.set_pixel_with_depth(1, 1, -0.1, 0xFF0000FF));
        assert!(fb.set_pixel_with_depth(1, 1, -0.5, 0xFFFF0000));
        assert!(!fb.set_pixel_with_depth(1, 1, -0.2, 0xFF00FF00));
        assert_eq!(fb.get_pixel(1, 1), Some(0xFFFF0000));
        assert_eq!(fb.depth_at(1, 1), Some(-0.5));
    }

    #[test]
    fn equal_depth_does_not_overwrite() {
        let (mut color, mut depth) = buffers(2, 2);
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 2, 2);
        fb.set_pixel_with_depth(0, 0, -0.3, 1);
        fb.set_pixel_with_depth(0, 0, -0.3, 2);
        assert_eq!(fb.get_pixel(0, 0), Some(1));
    }

    #[test]
    fn out_of_bounds_is_dropped_without_wrap() {
        let (mut color, mut depth) = buffers(4, 4);
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 4, 4);
        assert!(!fb.set_pixel_with_depth(5, 0, -1.0, 7));
        assert!(!fb.set_pixel_with_depth(-1, 0, -1.0, 7));
        assert_eq!(fb.get_pixel(5, 0), None);
        assert!(color.iter().all(|&c| c == 0));
    }

    #[test]
    fn out_of_bounds_wraps_when_enabled() {
        let (mut color, mut depth) = buffers(4, 4);
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 4, 4).with_wrap_around(true);
        assert!(fb.set_pixel_with_depth(5, -1, -1.0, 7));
        assert_eq!(fb.get_pixel(1, 3), Some(7));
    }

    #[test]
    fn wrap_extent_scales_with_larger_side() {
        let (mut color, mut depth) = buffers(8, 4);
        let fb = FrameBuffer::new(&mut color, &mut depth, 8, 4);
        assert_eq!(fb.wrap_extent(), 16.0);
    }
}
