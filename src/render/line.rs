//! Depth-tested line drawing with interpolated attributes.
//!
//! Lines are stepped DDA-style along the major axis so depth, brightness and
//! texture coordinates can be interpolated per pixel. Both endpoints are
//! drawn. Filled spans from the rasterizer go through the same routine.

use super::framebuffer::FrameBuffer;
use crate::colors::Color;
use crate::projection::CanvasPoint;
use crate::texture::Texture;

/// What a line writes into each pixel it covers.
#[derive(Debug, Clone, Copy)]
pub enum Paint<'t> {
    Solid(Color),
    /// Sampled from the endpoints' texture points (texel units).
    Texture(&'t Texture),
}

pub fn draw_line(buffer: &mut FrameBuffer, from: &CanvasPoint, to: &CanvasPoint, paint: Paint) {
    let span = (to.x - from.x).abs().max((to.y - from.y).abs());
    if !span.is_finite() {
        return;
    }

    let (from, to) = if buffer.wrap_around() {
        if span > buffer.wrap_extent() {
            log::trace!("Skipped wrapped line spanning {span:.0} pixels");
            return;
        }
        (*from, *to)
    } else {
        let Some((t0, t1)) = clip_to_viewport(from, to, buffer.width(), buffer.height()) else {
            return;
        };
        (
            if t0 > 0.0 { from.lerp(to, t0) } else { *from },
            if t1 < 1.0 { from.lerp(to, t1) } else { *to },
        )
    };
    let (from, to) = (&from, &to);

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs()).ceil() as u32;

    for i in 0..=steps {
        let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
        let point = from.lerp(to, t);
        let color = match paint {
            Paint::Solid(color) => color,
            Paint::Texture(texture) => match point.texture_point {
                Some(tp) => texture.sample_texel(tp.x, tp.y),
                None => texture.texel(0, 0),
            },
        };
        buffer.set_pixel_with_depth(
            point.x.round() as i32,
            point.y.round() as i32,
            point.depth,
            color.to_argb(point.brightness),
        );
    }
}

/// Parameter range of `from -> to` that lies over the buffer's pixels,
/// clipped Liang-Barsky style against `[-0.5, size - 0.5]` on each axis.
fn clip_to_viewport(
    from: &CanvasPoint,
    to: &CanvasPoint,
    width: u32,
    height: u32,
) -> Option<(f32, f32)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let (max_x, max_y) = (width as f32 - 0.5, height as f32 - 0.5);
    let bounds = [
        (-dx, from.x + 0.5),
        (dx, max_x - from.x),
        (-dy, from.y + 0.5),
        (dy, max_y - from.y),
    ];

    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    for (p, q) in bounds {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    (t0 <= t1).then_some((t0, t1))
}
