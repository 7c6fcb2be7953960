//! Pixel buffers and the 2D drawing primitives used by the raster modes.

pub mod framebuffer;
pub mod line;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::FrameBuffer;
pub use line::{draw_line, Paint};
pub use rasterizer::ScanlineRasterizer;
pub use renderer::Renderer;
