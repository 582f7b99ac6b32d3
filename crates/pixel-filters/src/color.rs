//! RGB <-> YCbCr conversion and luma weighting.
//!
//! The transform is the full-range JFIF one:
//!
//! ```text
//! Y  =       0.299    R + 0.587    G + 0.114    B
//! Cb = 128 - 0.168736 R - 0.331264 G + 0.5      B
//! Cr = 128 + 0.5      R - 0.418688 G - 0.081312 B
//!
//! R = Y                        + 1.402    (Cr - 128)
//! G = Y - 0.344136 (Cb - 128) - 0.714136 (Cr - 128)
//! B = Y + 1.772    (Cb - 128)
//! ```
//!
//! The `f64` conversions are exact inverses up to coefficient rounding.
//! Buffer-level conversions round and clamp every channel to a byte
//! independently.
//!
//! # Example
//!
//! ```
//! use pixel_filters::color::{Rgb, YCbCr};
//!
//! let rgb = Rgb::new(200.0, 100.0, 50.0);
//! let ycc = YCbCr::from(rgb);
//! let back = Rgb::from(ycc);
//! assert!((back.r - 200.0).abs() < 0.01);
//! ```

use crate::buffer::{clamp_byte, map_pixels, PixelBuffer, ALPHA, BLUE, GREEN, RED};
use crate::filter::ImageFilter;

/// An RGB triple with channel values nominally in `0.0..=255.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Read the color channels of a BGRA pixel.
    #[inline]
    pub fn from_bgra(px: [u8; 4]) -> Self {
        Self::new(px[RED] as f64, px[GREEN] as f64, px[BLUE] as f64)
    }
}

/// A YCbCr triple with chroma centered on 128.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YCbCr {
    pub y: f64,
    pub cb: f64,
    pub cr: f64,
}

impl YCbCr {
    #[inline]
    pub fn new(y: f64, cb: f64, cr: f64) -> Self {
        Self { y, cb, cr }
    }
}

impl From<Rgb> for YCbCr {
    fn from(c: Rgb) -> Self {
        Self {
            y: 0.299 * c.r + 0.587 * c.g + 0.114 * c.b,
            cb: 128.0 - 0.168736 * c.r - 0.331264 * c.g + 0.5 * c.b,
            cr: 128.0 + 0.5 * c.r - 0.418688 * c.g - 0.081312 * c.b,
        }
    }
}

impl From<YCbCr> for Rgb {
    fn from(c: YCbCr) -> Self {
        let cb = c.cb - 128.0;
        let cr = c.cr - 128.0;
        Self {
            r: c.y + 1.402 * cr,
            g: c.y - 0.344136 * cb - 0.714136 * cr,
            b: c.y + 1.772 * cb,
        }
    }
}

/// Per-channel weights used to collapse RGB into a single tone value.
///
/// Weights summing to 1.0 give a meaningful luma approximation, but this
/// is not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWeights {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ChannelWeights {
    /// The classic `0.3 / 0.59 / 0.11` luma approximation.
    pub const LUMA: ChannelWeights = ChannelWeights {
        r: 0.3,
        g: 0.59,
        b: 0.11,
    };

    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Weighted sum of the color channels.
    #[inline]
    pub fn tone(&self, c: Rgb) -> f64 {
        c.r * self.r + c.g * self.g + c.b * self.b
    }
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self::LUMA
    }
}

/// Store a pixel's YCbCr planes in its byte slots: Y in R, Cb in G, Cr in B.
#[inline]
pub(crate) fn encode_ycbcr(px: [u8; 4]) -> [u8; 4] {
    let c = YCbCr::from(Rgb::from_bgra(px));
    let mut out = [0u8; 4];
    out[RED] = clamp_byte(c.y);
    out[GREEN] = clamp_byte(c.cb);
    out[BLUE] = clamp_byte(c.cr);
    out[ALPHA] = 255;
    out
}

/// Inverse of [`encode_ycbcr`].
#[inline]
pub(crate) fn decode_ycbcr(px: [u8; 4]) -> [u8; 4] {
    let c = Rgb::from(YCbCr::new(
        px[RED] as f64,
        px[GREEN] as f64,
        px[BLUE] as f64,
    ));
    let mut out = [0u8; 4];
    out[RED] = clamp_byte(c.r);
    out[GREEN] = clamp_byte(c.g);
    out[BLUE] = clamp_byte(c.b);
    out[ALPHA] = 255;
    out
}

/// Convert a whole buffer to YCbCr planes (Y in R, Cb in G, Cr in B).
pub fn to_ycbcr(source: &PixelBuffer) -> PixelBuffer {
    map_pixels(source, encode_ycbcr)
}

/// Convert a buffer of YCbCr planes back to RGB.
pub fn from_ycbcr(source: &PixelBuffer) -> PixelBuffer {
    map_pixels(source, decode_ycbcr)
}

/// Shows the YCbCr planes of an image as if they were RGB.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YCbCrView;

impl ImageFilter for YCbCrView {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        to_ycbcr(source)
    }

    fn label(&self) -> String {
        "YCbCr".to_string()
    }
}

/// Collapse every pixel to a weighted gray, keeping its alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Grayscale {
    pub weights: ChannelWeights,
}

impl Grayscale {
    pub fn new(weights: ChannelWeights) -> Self {
        Self { weights }
    }
}

impl ImageFilter for Grayscale {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        let weights = self.weights;
        map_pixels(source, move |px| {
            let g = clamp_byte(weights.tone(Rgb::from_bgra(px)));
            let mut out = [g; 4];
            out[ALPHA] = px[ALPHA];
            out
        })
    }

    fn label(&self) -> String {
        "Grayscale".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_has_neutral_chroma() {
        let c = YCbCr::from(Rgb::new(90.0, 90.0, 90.0));
        assert!((c.y - 90.0).abs() < 1e-9);
        assert!((c.cb - 128.0).abs() < 1e-9);
        assert!((c.cr - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_float_round_trip_is_exact_after_rounding() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let rgb = Rgb::new(r as f64, g as f64, b as f64);
                    let back = Rgb::from(YCbCr::from(rgb));
                    assert_eq!(back.r.round(), rgb.r, "red of ({r},{g},{b})");
                    assert_eq!(back.g.round(), rgb.g, "green of ({r},{g},{b})");
                    assert_eq!(back.b.round(), rgb.b, "blue of ({r},{g},{b})");
                }
            }
        }
    }

    #[test]
    fn test_encode_stores_planes_in_rgb_slots() {
        // pure white: Y=255, Cb=Cr=128
        let px = encode_ycbcr([255, 255, 255, 7]);
        assert_eq!(px[RED], 255);
        assert_eq!(px[GREEN], 128);
        assert_eq!(px[BLUE], 128);
        assert_eq!(px[ALPHA], 255);
    }

    #[test]
    fn test_encode_clamps_out_of_range_chroma() {
        // pure blue pushes Cb to 255.5
        let px = encode_ycbcr([255, 0, 0, 255]);
        assert_eq!(px[GREEN], 255);
    }

    #[test]
    fn test_grayscale_keeps_alpha() {
        let source = PixelBuffer::filled(2, 1, [100, 100, 100, 40]);
        let out = Grayscale::default().apply(&source);
        assert_eq!(out.pixel(0, 0).unwrap(), [100, 100, 100, 40]);
    }

    #[test]
    fn test_grayscale_weights() {
        // R=200 only, weights 0.3 -> 60
        let source = PixelBuffer::filled(1, 1, [0, 0, 200, 255]);
        let out = Grayscale::default().apply(&source);
        assert_eq!(out.pixel(0, 0).unwrap(), [60, 60, 60, 255]);
    }
}
