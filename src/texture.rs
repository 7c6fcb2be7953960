//! Decoded texture images and nearest-neighbour sampling.

use std::io;
use std::path::Path;

use image::ImageError;

use crate::colors::Color;
use crate::scene::LoadError;

/// Represents a 2D texture for texture mapping.
///
/// Pixels are stored row-major with the origin at the top-left corner, so the
/// texel at column `u`, row `v` lives at `v * width + u`.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Wraps an already-decoded pixel array.
    ///
    /// Fails with [`LoadError::TruncatedData`] when `pixels` does not hold
    /// exactly `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, LoadError> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return Err(LoadError::TruncatedData {
                path: "<memory>".into(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Loads a texture from an image file (PPM, PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|err| classify_image_error(path, err))?
            .to_rgb8();
        let (width, height) = img.dimensions();

        let pixels: Vec<Color> = img
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                Color::new(r, g, b)
            })
            .collect();

        log::debug!("Loaded texture {} ({width}x{height})", path.display());

        Self::new(width, height, pixels).map_err(|_| LoadError::TruncatedData {
            path: path.to_path_buf(),
        })
    }

    /// Returns the texel at (`column`, `row`), clamped to the image bounds.
    #[inline]
    pub fn texel(&self, column: i64, row: i64) -> Color {
        let column = column.clamp(0, self.width as i64 - 1) as usize;
        let row = row.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[row * self.width as usize + column]
    }

    /// Nearest-neighbour lookup with coordinates already in texel units.
    #[inline]
    pub fn sample_texel(&self, u: f32, v: f32) -> Color {
        if !u.is_finite() || !v.is_finite() {
            return self.texel(0, 0);
        }
        self.texel(u.round() as i64, v.round() as i64)
    }

    /// Nearest-neighbour lookup with normalized [0, 1] coordinates.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Color {
        self.sample_texel(u * self.width as f32, v * self.height as f32)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

fn classify_image_error(path: &Path, err: ImageError) -> LoadError {
    match err {
        ImageError::IoError(ref e) if e.kind() == io::ErrorKind::NotFound => {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        }
        ImageError::IoError(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            LoadError::TruncatedData {
                path: path.to_path_buf(),
            }
        }
        other => LoadError::BadHeader {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0);
    const GREEN: Color = Color::new(0, 255, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    /// 3 columns x 2 rows, distinct enough to catch a transposed index.
    fn wide_texture() -> Texture {
        Texture::new(
            3,
            2,
            vec![RED, GREEN, BLUE, Color::WHITE, Color::BLACK, RED],
        )
        .unwrap()
    }

    #[test]
    fn texel_index_is_row_major() {
        let texture = wide_texture();
        assert_eq!(texture.texel(2, 0), BLUE);
        assert_eq!(texture.texel(0, 1), Color::WHITE);
        assert_eq!(texture.texel(1, 1), Color::BLACK);
    }

    #[test]
    fn sample_texel_rounds_to_nearest() {
        let texture = wide_texture();
        assert_eq!(texture.sample_texel(1.6, 0.4), BLUE);
        assert_eq!(texture.sample_texel(0.4, 0.6), Color::WHITE);
    }

    #[test]
    fn out_of_range_coordinates_clamp() {
        let texture = wide_texture();
        assert_eq!(texture.sample_texel(-5.0, -5.0), RED);
        assert_eq!(texture.sample_texel(50.0, 50.0), RED);
        assert_eq!(texture.sample_texel(f32::NAN, 0.0), RED);
    }

    #[test]
    fn normalized_sample_scales_by_dimensions() {
        let texture = wide_texture();
        // u = 0.5 -> column 1.5 rounds to 2, v = 0.0 -> row 0
        assert_eq!(texture.sample(0.5, 0.0), BLUE);
    }

    #[test]
    fn wrong_pixel_count_is_truncated_data() {
        let err = Texture::new(2, 2, vec![RED]).unwrap_err();
        assert!(matches!(err, LoadError::TruncatedData { .. }));
    }

    #[test]
    fn dimensions_beyond_u32_area_are_rejected() {
        // 65536 * 65536 does not fit in a u32
        let err = Texture::new(1 << 16, 1 << 16, vec![RED]).unwrap_err();
        assert!(matches!(err, LoadError::TruncatedData { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Texture::from_file("definitely/not/here.ppm").unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }

    #[test]
    fn loads_binary_ppm() {
        let path = std::env::temp_dir().join("prism_texture_test.ppm");
        let mut bytes = b"P6\n2 1\n255\n".to_vec();
        bytes.extend_from_slice(&[255, 0, 0, 0, 0, 255]);
        std::fs::write(&path, bytes).unwrap();

        let texture = Texture::from_file(&path).unwrap();
        assert_eq!((texture.width(), texture.height()), (2, 1));
        assert_eq!(texture.texel(0, 0), RED);
        assert_eq!(texture.texel(1, 0), BLUE);

        let _ = std::fs::remove_file(path);
    }
}
