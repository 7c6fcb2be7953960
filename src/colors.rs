//! RGB colors and ARGB8888 packing.

/// Frame clear color (ARGB8888).
pub const BACKGROUND: u32 = 0xFF000000;

/// Drawn for objects whose material reference could not be resolved.
pub const MISSING_MATERIAL: Color = Color::new(255, 0, 255);

/// An 8-bit-per-channel RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts floating point channels in [0, 1] (as found in material
    /// files) to 8-bit channels, rounding to nearest.
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Unpacks an ARGB8888 value, discarding alpha.
    pub fn from_argb(argb: u32) -> Self {
        Self::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }

    /// Packs into opaque ARGB8888 with every channel scaled by `brightness`.
    ///
    /// Brightness is clamped to [0, 1] so a channel never overflows.
    #[inline]
    pub fn to_argb(self, brightness: f32) -> u32 {
        let brightness = if brightness.is_nan() {
            0.0
        } else {
            brightness.clamp(0.0, 1.0)
        };
        let r = (self.r as f32 * brightness) as u32;
        let g = (self.g as f32 * brightness) as u32;
        let b = (self.b as f32 * brightness) as u32;
        0xFF00_0000 | (r << 16) | (g << 8) | b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_full_brightness() {
        assert_eq!(Color::new(0x12, 0x34, 0x56).to_argb(1.0), 0xFF123456);
    }

    #[test]
    fn scales_channels_by_brightness() {
        assert_eq!(Color::new(200, 100, 50).to_argb(0.5), 0xFF643219);
    }

    #[test]
    fn brightness_is_clamped() {
        let color = Color::WHITE;
        assert_eq!(color.to_argb(3.0), 0xFFFFFFFF);
        assert_eq!(color.to_argb(-1.0), 0xFF000000);
    }

    #[test]
    fn unit_channels_round_to_nearest() {
        assert_eq!(Color::from_unit(1.0, 0.5, 0.0), Color::new(255, 128, 0));
    }

    #[test]
    fn argb_round_trips_channels() {
        let color = Color::new(1, 2, 3);
        assert_eq!(Color::from_argb(color.to_argb(1.0)), color);
    }
}
