//! Point filters: per-pixel transforms with no neighbor access.
//!
//! Every filter here maps each color byte independently through a fixed
//! function of the filter's parameters, clamps to `0..=255`, and forces
//! alpha to 255. Rows are processed in parallel.

use crate::buffer::{clamp_byte, map_pixels, PixelBuffer, ALPHA, BLUE, GREEN, RED};
use crate::filter::ImageFilter;

/// Map the three color channels through `f`, forcing alpha opaque.
fn map_channels<F>(source: &PixelBuffer, f: F) -> PixelBuffer
where
    F: Fn(u8) -> u8 + Sync,
{
    map_pixels(source, |px| {
        let mut out = [0u8; 4];
        for c in [BLUE, GREEN, RED] {
            out[c] = f(px[c]);
        }
        out[ALPHA] = 255;
        out
    })
}

/// `255 - v` per color channel.
///
/// Applying it twice restores the color channels exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Invert;

impl ImageFilter for Invert {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        map_channels(source, |v| 255 - v)
    }

    fn label(&self) -> String {
        "Invert".to_string()
    }
}

/// Adds a signed amount to every color byte, saturating at 0 and 255.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brightness {
    pub amount: i32,
}

impl Brightness {
    pub const DEFAULT_AMOUNT: i32 = 10;

    pub fn new(amount: i32) -> Self {
        Self { amount }
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::new(Self::DEFAULT_AMOUNT)
    }
}

impl ImageFilter for Brightness {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        let amount = self.amount;
        map_channels(source, move |v| (v as i32).saturating_add(amount).clamp(0, 255) as u8)
    }

    fn label(&self) -> String {
        format!("Brightness {:+}", self.amount)
    }
}

/// Stretches channel values away from (or toward) mid-gray.
///
/// `amount` is a percentage delta: the scale is `(100 + amount) / 100`, so
/// `+30` stretches by 1.3 and `-50` halves the distance from 0.5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contrast {
    pub amount: f64,
}

impl Contrast {
    pub const DEFAULT_AMOUNT: f64 = 30.0;

    pub fn new(amount: f64) -> Self {
        Self { amount }
    }

    /// Multiplier applied around the midpoint.
    #[inline]
    pub fn scale(&self) -> f64 {
        (100.0 + self.amount) / 100.0
    }
}

impl Default for Contrast {
    fn default() -> Self {
        Self::new(Self::DEFAULT_AMOUNT)
    }
}

impl ImageFilter for Contrast {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        let scale = self.scale();
        map_channels(source, move |v| {
            let normalized = v as f64 / 255.0;
            clamp_byte(((normalized - 0.5) * scale + 0.5) * 255.0)
        })
    }

    fn label(&self) -> String {
        format!("Contrast {:+}%", self.amount)
    }
}

/// Power-law correction `out = 255 * c * (in / 255) ^ gamma`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gamma {
    pub gamma: f64,
    pub c: f64,
}

impl Gamma {
    pub const DEFAULT_GAMMA: f64 = 1.5;
    pub const DEFAULT_C: f64 = 1.0;

    pub fn new(gamma: f64, c: f64) -> Self {
        Self { gamma, c }
    }
}

impl Default for Gamma {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GAMMA, Self::DEFAULT_C)
    }
}

impl ImageFilter for Gamma {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        // Only 256 possible inputs
        let mut lut = [0u8; 256];
        for (v, slot) in lut.iter_mut().enumerate() {
            *slot = clamp_byte(255.0 * self.c * (v as f64 / 255.0).powf(self.gamma));
        }
        map_channels(source, move |v| lut[v as usize])
    }

    fn label(&self) -> String {
        format!("Gamma {} (c={})", self.gamma, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_pixel(b: u8, g: u8, r: u8, a: u8) -> PixelBuffer {
        PixelBuffer::filled(1, 1, [b, g, r, a])
    }

    #[test]
    fn test_invert_values() {
        let out = Invert.apply(&one_pixel(0, 100, 255, 3));
        assert_eq!(out.pixel(0, 0).unwrap(), [255, 155, 0, 255]);
    }

    #[test]
    fn test_brightness_saturates() {
        let out = Brightness::new(10).apply(&one_pixel(0, 250, 128, 0));
        assert_eq!(out.pixel(0, 0).unwrap(), [10, 255, 138, 255]);

        let out = Brightness::new(-20).apply(&one_pixel(5, 250, 128, 0));
        assert_eq!(out.pixel(0, 0).unwrap(), [0, 230, 108, 255]);
    }

    #[test]
    fn test_brightness_extreme_amounts() {
        let out = Brightness::new(i32::MAX).apply(&one_pixel(1, 2, 3, 4));
        assert_eq!(out.pixel(0, 0).unwrap(), [255, 255, 255, 255]);
        let out = Brightness::new(i32::MIN).apply(&one_pixel(1, 2, 3, 4));
        assert_eq!(out.pixel(0, 0).unwrap(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_contrast_default_scale() {
        assert!((Contrast::default().scale() - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_contrast_stretches_around_midpoint() {
        // 255 * ((0 - 0.5) * 1.3 + 0.5) = -38.25 -> 0
        // 255 * ((1 - 0.5) * 1.3 + 0.5) = 293.25 -> 255
        // 200/255 -> ((0.784 - 0.5) * 1.3 + 0.5) * 255 = 221.75 -> 222
        let out = Contrast::default().apply(&one_pixel(0, 255, 200, 9));
        assert_eq!(out.pixel(0, 0).unwrap(), [0, 255, 222, 255]);
    }

    #[test]
    fn test_contrast_zero_amount_is_identity() {
        let source = PixelBuffer::from_packed(2, 1, vec![1, 50, 128, 255, 200, 254, 0, 255]).unwrap();
        assert_eq!(Contrast::new(0.0).apply(&source), source);
    }

    #[test]
    fn test_gamma_endpoints_and_midtone() {
        // 255 * (128/255)^1.5 = 90.69 -> 91
        let out = Gamma::default().apply(&one_pixel(0, 255, 128, 0));
        assert_eq!(out.pixel(0, 0).unwrap(), [0, 255, 91, 255]);
    }

    #[test]
    fn test_gamma_c_scales_and_clamps() {
        let out = Gamma::new(1.0, 2.0).apply(&one_pixel(100, 200, 0, 0));
        assert_eq!(out.pixel(0, 0).unwrap(), [200, 255, 0, 255]);
    }

    #[test]
    fn test_point_filters_force_alpha() {
        let source = one_pixel(10, 20, 30, 0);
        let filters: [&dyn ImageFilter; 4] = [
            &Invert,
            &Brightness::default(),
            &Contrast::default(),
            &Gamma::default(),
        ];
        for f in filters {
            assert_eq!(f.apply(&source).pixel(0, 0).unwrap()[ALPHA], 255);
        }
    }
}
