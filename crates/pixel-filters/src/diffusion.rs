//! Error diffusion and YCbCr requantization.
//!
//! [`Dithering`] collapses each pixel to a weighted gray tone and pushes
//! the per-channel difference onto pixels not yet visited, in raster order.
//! Each pixel depends on error written by earlier ones, so a pass runs
//! sequentially on a private `f64` working copy of the source.
//!
//! ```text
//!        X   7          error at X is split over the
//!    3   5   1          causal neighbors (x 1/16)
//! ```
//!
//! Like convolution, only pixels at least one kernel radius from every edge
//! are processed; border pixels are copied from the source and never
//! receive diffused error.

use crate::buffer::{clamp_byte, PixelBuffer, BLUE, BYTES_PER_PIXEL, GREEN, RED};
use crate::color::{decode_ycbcr, encode_ycbcr, ChannelWeights, Rgb};
use crate::error::FilterError;
use crate::filter::ImageFilter;
use crate::kernel::{DiffusionKernel, FilterMatrix};

/// Error-diffusion dithering to a weighted gray tone.
///
/// # Example
///
/// ```
/// use pixel_filters::{Dithering, ImageFilter, PixelBuffer};
///
/// let gray = PixelBuffer::filled(3, 3, [128, 128, 128, 255]);
/// let out = Dithering::default().apply(&gray);
/// assert_eq!(out, gray);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dithering {
    matrix: FilterMatrix,
    weights: ChannelWeights,
}

impl Dithering {
    /// Build from a custom diffusion matrix.
    ///
    /// Returns [`FilterError::NonCausalKernel`] if the matrix carries weight
    /// at or before its anchor cell.
    pub fn new(matrix: FilterMatrix, weights: ChannelWeights) -> Result<Self, FilterError> {
        matrix.check_causal()?;
        Ok(Self { matrix, weights })
    }

    /// One of the built-in kernels. These are causal by construction.
    pub fn from_kernel(kernel: DiffusionKernel, weights: ChannelWeights) -> Self {
        Self {
            matrix: kernel.matrix(),
            weights,
        }
    }

    pub fn matrix(&self) -> &FilterMatrix {
        &self.matrix
    }

    pub fn weights(&self) -> ChannelWeights {
        self.weights
    }
}

impl Default for Dithering {
    fn default() -> Self {
        Self::from_kernel(DiffusionKernel::default(), ChannelWeights::LUMA)
    }
}

impl ImageFilter for Dithering {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        diffuse(source, &self.matrix, self.weights)
    }

    fn label(&self) -> String {
        match builtin_name(&self.matrix) {
            Some(name) => format!("Dithering ({name})"),
            None => format!(
                "Dithering ({}x{})",
                self.matrix.width(),
                self.matrix.height()
            ),
        }
    }
}

fn builtin_name(matrix: &FilterMatrix) -> Option<&'static str> {
    DiffusionKernel::ALL
        .iter()
        .find(|k| k.matrix() == *matrix)
        .map(|k| k.name())
}

/// Run one diffusion pass of `matrix` over `source`.
pub fn diffuse(source: &PixelBuffer, matrix: &FilterMatrix, weights: ChannelWeights) -> PixelBuffer {
    let mut output = source.to_packed();
    let width = source.width() as usize;
    let height = source.height() as usize;
    let (rx, ry) = (matrix.radius_x(), matrix.radius_y());

    if width < 2 * rx + 1 || height < 2 * ry + 1 {
        return output;
    }

    let cells: Vec<(usize, usize, f64)> = matrix.nonzero_cells().collect();

    // Indexed like the pixel bytes: [BLUE, GREEN, RED]
    let mut working: Vec<[f64; 3]> = (0..height)
        .flat_map(move |y| {
            source
                .row(y)
                .chunks_exact(BYTES_PER_PIXEL)
                .map(|px| [px[BLUE] as f64, px[GREEN] as f64, px[RED] as f64])
        })
        .collect();

    for y in ry..height - ry {
        for x in rx..width - rx {
            let px = working[y * width + x];
            let g = clamp_byte(weights.tone(Rgb::new(px[RED], px[GREEN], px[BLUE])));

            let o = output.offset(x, y);
            output.data_mut()[o..o + BYTES_PER_PIXEL].copy_from_slice(&[g, g, g, 255]);

            let tone = g as f64;
            let error = [px[0] - tone, px[1] - tone, px[2] - tone];
            if error == [0.0; 3] {
                continue;
            }

            // Causal cells always land inside the image for interior pixels
            for &(row, col, weight) in &cells {
                let target = &mut working[(y + row - ry) * width + (x + col - rx)];
                for (value, err) in target.iter_mut().zip(error) {
                    *value = (*value + err * weight).clamp(0.0, 255.0);
                }
            }
        }
    }

    output
}

/// Coarse requantization in YCbCr space, without error propagation.
///
/// Each interior pixel is converted to YCbCr byte planes, every plane is
/// rounded to the nearest multiple of 4 (capped at 255), and the result is
/// converted back to RGB.
/// The matrix only sets the untouched border margin; the weights are kept
/// for configuration round-trips and do not affect the output.
#[derive(Debug, Clone, PartialEq)]
pub struct YCbCrDithering {
    matrix: FilterMatrix,
    weights: ChannelWeights,
}

impl YCbCrDithering {
    /// Quantization step applied to Y, Cb and Cr.
    pub const STEP: f64 = 4.0;

    pub fn new(matrix: FilterMatrix, weights: ChannelWeights) -> Self {
        Self { matrix, weights }
    }

    pub fn matrix(&self) -> &FilterMatrix {
        &self.matrix
    }

    pub fn weights(&self) -> ChannelWeights {
        self.weights
    }
}

impl Default for YCbCrDithering {
    fn default() -> Self {
        Self::new(DiffusionKernel::Atkinson.matrix(), ChannelWeights::LUMA)
    }
}

#[inline]
fn snap(v: u8) -> u8 {
    clamp_byte((v as f64 / YCbCrDithering::STEP).round() * YCbCrDithering::STEP)
}

impl ImageFilter for YCbCrDithering {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        let mut output = source.to_packed();
        let width = source.width() as usize;
        let height = source.height() as usize;
        let (rx, ry) = (self.matrix.radius_x(), self.matrix.radius_y());

        if width < 2 * rx + 1 || height < 2 * ry + 1 {
            return output;
        }

        for y in ry..height - ry {
            let row_in = source.row(y);
            for x in rx..width - rx {
                let i = x * BYTES_PER_PIXEL;
                let px = [row_in[i], row_in[i + 1], row_in[i + 2], row_in[i + 3]];
                let mut planes = encode_ycbcr(px);
                for c in [BLUE, GREEN, RED] {
                    planes[c] = snap(planes[c]);
                }
                let out = decode_ycbcr(planes);

                let o = output.offset(x, y);
                output.data_mut()[o..o + BYTES_PER_PIXEL].copy_from_slice(&out);
            }
        }

        output
    }

    fn label(&self) -> String {
        "YCbCr dithering".to_string()
    }
}
