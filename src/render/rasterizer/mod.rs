//! Scanline-based triangle rasterization.
//!
//! Triangles are filled one horizontal scanline at a time using the classic
//! flat-top/flat-bottom decomposition.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by Y coordinate (top to bottom in screen space)
//! 2. **Split** the long edge `v0 -> v2` at the height of `v1`
//! 3. **Rasterize** each row by interpolating the left and right edges and
//!    handing the resulting span to [`draw_line`]
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>      /----\<- split at v1.y
//!     /      \             v1   split
//!    /________\             \    /
//!   v1        v2             \  /
//!                             \/
//!                             v2
//!
//!   General triangle      Flat-bottom (top) + Flat-top (bottom)
//! ```
//!
//! # Row ownership
//!
//! The upper half owns rows `ceil(v0.y) .. v1.y` (exclusive) and the lower
//! half owns `ceil(v1.y) ..= floor(v2.y)`, so no row is drawn twice and a
//! flat-top or flat-bottom triangle needs no special casing.
//!
//! With wrap-around on, rows and spans are not clamped to the buffer, so a
//! triangle whose bounding box is larger than [`FrameBuffer::wrap_extent`]
//! is skipped instead.
//!
//! Span endpoints are snapped inward to whole pixels with a small tolerance,
//! which keeps pixels lying exactly on an edge inside the triangle whatever
//! the vertex order.
//!
//! # Attribute interpolation
//!
//! Depth, brightness and texture points are interpolated linearly in screen
//! space: first along the two edges (using Y progress), then across the span
//! (using X progress).

use super::framebuffer::FrameBuffer;
use super::line::{draw_line, Paint};
use crate::projection::{CanvasPoint, CanvasTriangle};
use crate::texture::Texture;

/// Triangles shorter than this are skipped.
const DEGENERATE_HEIGHT: f32 = 1e-6;

/// Tolerance when snapping span ends to pixel centres.
const EDGE_EPSILON: f32 = 1e-3;

/// Scanline-based triangle rasterizer.
///
/// Handles vertex sorting internally, so input triangles can have their
/// vertices in any order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Sorts three vertices by Y coordinate (ascending: top to bottom).
    ///
    /// Uses a 3-element bubble sort; it is stable, so vertices with equal Y
    /// keep their relative order. After sorting: `v0.y <= v1.y <= v2.y`.
    pub fn sort_vertices(vertices: [CanvasPoint; 3]) -> [CanvasPoint; 3] {
        let [mut v0, mut v1, mut v2] = vertices;
        if v1.y < v0.y {
            std::mem::swap(&mut v0, &mut v1);
        }
        if v2.y < v1.y {
            std::mem::swap(&mut v1, &mut v2);
        }
        if v1.y < v0.y {
            std::mem::swap(&mut v0, &mut v1);
        }
        [v0, v1, v2]
    }

    /// Draws the three edges of a triangle in its own color.
    pub fn stroke_triangle(&self, triangle: &CanvasTriangle, buffer: &mut FrameBuffer) {
        if exceeds_wrap_extent(triangle, buffer) {
            return;
        }
        let [p0, p1, p2] = triangle.vertices;
        let paint = Paint::Solid(triangle.color);
        draw_line(buffer, &p0, &p1, paint);
        draw_line(buffer, &p1, &p2, paint);
        draw_line(buffer, &p2, &p0, paint);
    }

    /// Fills a triangle with its flat color.
    pub fn fill_triangle(&self, triangle: &CanvasTriangle, buffer: &mut FrameBuffer) {
        self.rasterize(triangle, buffer, Paint::Solid(triangle.color));
    }

    /// Fills a triangle by sampling `texture` at the interpolated texture
    /// points (texel units).
    pub fn texture_triangle(
        &self,
        triangle: &CanvasTriangle,
        texture: &Texture,
        buffer: &mut FrameBuffer,
    ) {
        self.rasterize(triangle, buffer, Paint::Texture(texture));
    }

    fn rasterize(&self, triangle: &CanvasTriangle, buffer: &mut FrameBuffer, paint: Paint) {
        if exceeds_wrap_extent(triangle, buffer) {
            return;
        }
        let [v0, v1, v2] = Self::sort_vertices(triangle.vertices);
        let height = v2.y - v0.y;
        if !height.is_finite() || height < DEGENERATE_HEIGHT {
            return;
        }

        // Point on the long edge level with v1
        let split = v0.lerp(&v2, (v1.y - v0.y) / height);

        let (min_row, max_row) = if buffer.wrap_around() {
            (i32::MIN, i32::MAX)
        } else {
            (0, buffer.height() as i32 - 1)
        };

        // Upper half: flat-bottom triangle v0, v1, split
        let first = (v0.y.ceil() as i32).max(min_row);
        let mut row = first;
        while (row as f32) < v1.y && row <= max_row {
            let y = row as f32;
            let a = edge_at(&v0, &v1, y);
            let b = edge_at(&v0, &split, y);
            self.draw_span(buffer, row, a, b, paint);
            row += 1;
        }

        // Lower half: flat-top triangle v1, split, v2
        let first = (v1.y.ceil() as i32).max(min_row);
        let last = (v2.y.floor() as i32).min(max_row);
        for row in first..=last {
            let y = row as f32;
            let a = edge_at(&v1, &v2, y);
            let b = edge_at(&split, &v2, y);
            self.draw_span(buffer, row, a, b, paint);
        }
    }

    #[inline]
    fn draw_span(
        &self,
        buffer: &mut FrameBuffer,
        row: i32,
        a: CanvasPoint,
        b: CanvasPoint,
        paint: Paint,
    ) {
        let (left, right) = if a.x <= b.x { (a, b) } else { (b, a) };
        let mut x_start = (left.x - EDGE_EPSILON).ceil();
        let mut x_end = (right.x + EDGE_EPSILON).floor();
        if !buffer.wrap_around() {
            x_start = x_start.max(0.0);
            x_end = x_end.min(buffer.width() as f32 - 1.0);
        }
        if x_start > x_end {
            return;
        }

        let width = right.x - left.x;
        let at = |x: f32| {
            let t = if width.abs() < DEGENERATE_HEIGHT {
                0.0
            } else {
                ((x - left.x) / width).clamp(0.0, 1.0)
            };
            CanvasPoint {
                x,
                y: row as f32,
                ..left.lerp(&right, t)
            }
        };
        draw_line(buffer, &at(x_start), &at(x_end), paint);
    }
}

/// Whether wrap-around is on and the triangle's bounding box is too large to
/// fold onto the buffer.
fn exceeds_wrap_extent(triangle: &CanvasTriangle, buffer: &FrameBuffer) -> bool {
    if !buffer.wrap_around() {
        return false;
    }
    let (mut min, mut max) = ([f32::INFINITY; 2], [f32::NEG_INFINITY; 2]);
    for v in &triangle.vertices {
        min = [min[0].min(v.x), min[1].min(v.y)];
        max = [max[0].max(v.x), max[1].max(v.y)];
    }
    let extent = (max[0] - min[0]).max(max[1] - min[1]);
    if extent.is_nan() || extent > buffer.wrap_extent() {
        log::trace!("Skipped wrapped triangle spanning {extent:.0} pixels");
        return true;
    }
    false
}

/// Interpolates the edge `from -> to` at height `y`.
#[inline]
fn edge_at(from: &CanvasPoint, to: &CanvasPoint, y: f32) -> CanvasPoint {
    let dy = to.y - from.y;
    let t = if dy.abs() < DEGENERATE_HEIGHT {
        0.0
    } else {
        ((y - from.y) / dy).clamp(0.0, 1.0)
    };
    from.lerp(to, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Color, BACKGROUND};
    use crate::math::vec2::Vec2;
    use crate::render::renderer::Renderer;

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    fn triangle(points: [(f32, f32); 3], depth: f32, color: Color) -> CanvasTriangle {
        CanvasTriangle::new(points.map(|(x, y)| CanvasPoint::new(x, y, depth)), color)
    }

    fn filled(renderer: &Renderer) -> Vec<(u32, u32)> {
        let mut pixels = Vec::new();
        for y in 0..renderer.height() {
            for x in 0..renderer.width() {
                if renderer.pixel(x, y) != Some(BACKGROUND) {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    /// Integer edge-function coverage, inclusive of the edges.
    fn covers(points: [(i64, i64); 3], x: i64, y: i64) -> bool {
        let edge = |(ax, ay): (i64, i64), (bx, by): (i64, i64)| {
            (bx - ax) * (y - ay) - (by - ay) * (x - ax)
        };
        let e = [
            edge(points[0], points[1]),
            edge(points[1], points[2]),
            edge(points[2], points[0]),
        ];
        e.iter().all(|&v| v >= 0) || e.iter().all(|&v| v <= 0)
    }

    #[test]
    fn sort_orders_by_y_and_is_idempotent() {
        let t = triangle([(0.0, 9.0), (5.0, 1.0), (3.0, 4.0)], -1.0, RED);
        let sorted = ScanlineRasterizer::sort_vertices(t.vertices);
        assert!(sorted[0].y <= sorted[1].y && sorted[1].y <= sorted[2].y);
        assert_eq!(ScanlineRasterizer::sort_vertices(sorted), sorted);
    }

    #[test]
    fn sort_is_stable_for_equal_y() {
        let t = triangle([(7.0, 2.0), (1.0, 2.0), (3.0, 0.0)], -1.0, RED);
        let sorted = ScanlineRasterizer::sort_vertices(t.vertices);
        assert_eq!(sorted[1].x, 7.0);
        assert_eq!(sorted[2].x, 1.0);
    }

    #[test]
    fn fill_matches_edge_function_coverage() {
        let points = [(10, 10), (100, 10), (55, 100)];
        let mut renderer = Renderer::new(128, 128);
        ScanlineRasterizer::new().fill_triangle(
            &triangle(points.map(|(x, y)| (x as f32, y as f32)), -1.0, RED),
            &mut renderer.as_framebuffer(false),
        );

        for y in 0..128 {
            for x in 0..128 {
                let expected = covers(points, x as i64, y as i64);
                let drawn = renderer.pixel(x, y) == Some(RED.to_argb(1.0));
                assert_eq!(drawn, expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn fill_is_winding_invariant() {
        let a = (12.0, 5.0);
        let b = (60.0, 30.0);
        let c = (20.0, 58.0);
        let orders = [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]];

        let mut reference = None;
        for order in orders {
            let mut renderer = Renderer::new(64, 64);
            ScanlineRasterizer::new()
                .fill_triangle(&triangle(order, -1.0, RED), &mut renderer.as_framebuffer(false));
            let pixels = filled(&renderer);
            assert!(!pixels.is_empty());
            match &reference {
                None => reference = Some(pixels),
                Some(expected) => assert_eq!(&pixels, expected),
            }
        }
    }

    #[test]
    fn nearer_triangle_wins_in_any_draw_order() {
        let far = triangle([(0.0, 0.0), (30.0, 0.0), (0.0, 30.0)], -0.05, RED);
        let near = triangle([(5.0, 5.0), (31.0, 5.0), (5.0, 31.0)], -0.5, BLUE);

        for order in [[far, near], [near, far]] {
            let mut renderer = Renderer::new(32, 32);
            {
                let mut fb = renderer.as_framebuffer(false);
                for t in &order {
                    ScanlineRasterizer::new().fill_triangle(t, &mut fb);
                }
            }
            assert_eq!(renderer.pixel(10, 10), Some(BLUE.to_argb(1.0)));
            assert_eq!(renderer.pixel(2, 2), Some(RED.to_argb(1.0)));
        }
    }

    #[test]
    fn zero_height_triangle_draws_nothing() {
        let mut renderer = Renderer::new(32, 32);
        ScanlineRasterizer::new().fill_triangle(
            &triangle([(1.0, 8.0), (20.0, 8.0), (11.0, 8.0)], -1.0, RED),
            &mut renderer.as_framebuffer(false),
        );
        assert!(filled(&renderer).is_empty());
    }

    #[test]
    fn stroke_draws_edges_only() {
        let mut renderer = Renderer::new(64, 64);
        ScanlineRasterizer::new().stroke_triangle(
            &triangle([(10.0, 10.0), (50.0, 10.0), (30.0, 50.0)], -1.0, RED),
            &mut renderer.as_framebuffer(false),
        );
        assert_eq!(renderer.pixel(30, 10), Some(RED.to_argb(1.0)));
        assert_eq!(renderer.pixel(30, 50), Some(RED.to_argb(1.0)));
        assert_eq!(renderer.pixel(30, 25), Some(BACKGROUND));
    }

    #[test]
    fn texture_u_runs_along_columns() {
        let left = Color::new(10, 0, 0);
        let right = Color::new(0, 20, 0);
        let texture = Texture::new(2, 1, vec![left, right]).unwrap();
        let tri = CanvasTriangle::new(
            [
                CanvasPoint::new(0.0, 0.0, -1.0).with_texture_point(Vec2::new(0.0, 0.0)),
                CanvasPoint::new(20.0, 0.0, -1.0).with_texture_point(Vec2::new(1.0, 0.0)),
                CanvasPoint::new(0.0, 20.0, -1.0).with_texture_point(Vec2::new(0.0, 0.0)),
            ],
            Color::WHITE,
        );

        let mut renderer = Renderer::new(32, 32);
        ScanlineRasterizer::new().texture_triangle(
            &tri,
            &texture,
            &mut renderer.as_framebuffer(false),
        );
        assert_eq!(renderer.pixel(1, 1), Some(left.to_argb(1.0)));
        assert_eq!(renderer.pixel(18, 1), Some(right.to_argb(1.0)));
    }

    #[test]
    fn offscreen_parts_are_clipped_without_wrap() {
        let mut renderer = Renderer::new(16, 16);
        ScanlineRasterizer::new().fill_triangle(
            &triangle([(-40.0, -40.0), (40.0, -40.0), (0.0, 40.0)], -1.0, RED),
            &mut renderer.as_framebuffer(false),
        );
        assert_eq!(renderer.pixel(0, 0), Some(RED.to_argb(1.0)));
        assert_eq!(renderer.pixel(15, 0), Some(RED.to_argb(1.0)));
    }

    #[test]
    fn wrapped_fill_folds_onto_opposite_edge() {
        let mut renderer = Renderer::new(16, 16);
        ScanlineRasterizer::new().fill_triangle(
            &triangle([(12.0, 2.0), (20.0, 2.0), (12.0, 10.0)], -1.0, RED),
            &mut renderer.as_framebuffer(true),
        );
        assert_eq!(renderer.pixel(13, 3), Some(RED.to_argb(1.0)));
        assert_eq!(renderer.pixel(1, 3), Some(RED.to_argb(1.0)));
    }

    #[test]
    fn oversized_wrapped_triangle_is_skipped() {
        let huge = triangle([(-5.0e5, -5.0e5), (5.0e5, -5.0e5), (0.0, 5.0e5)], -1.0, RED);
        let mut renderer = Renderer::new(16, 16);
        {
            let mut fb = renderer.as_framebuffer(true);
            let scanline = ScanlineRasterizer::new();
            scanline.fill_triangle(&huge, &mut fb);
            scanline.stroke_triangle(&huge, &mut fb);
        }
        assert!(renderer.pixels().iter().all(|&c| c == BACKGROUND));

        ScanlineRasterizer::new().fill_triangle(&huge, &mut renderer.as_framebuffer(false));
        assert!(renderer.pixels().iter().all(|&c| c == RED.to_argb(1.0)));
    }
}
