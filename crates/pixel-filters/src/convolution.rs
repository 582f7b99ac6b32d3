//! Spatial convolution with an arbitrary odd-sized kernel.
//!
//! # Border policy
//!
//! Only pixels whose whole neighborhood lies inside the image are
//! convolved: those at least `radius_x` columns and `radius_y` rows from
//! every edge. Border pixels are copied unchanged from the source
//! (including their alpha). An image no larger than the kernel comes back
//! as a packed copy of the source.

use rayon::prelude::*;

use crate::buffer::{clamp_byte, PixelBuffer, ALPHA, BLUE, BYTES_PER_PIXEL, GREEN, RED};
use crate::filter::ImageFilter;
use crate::kernel::{ConvolutionKernel, FilterMatrix};

/// Weighted-neighborhood filter: `out = clamp(factor * sum(w * in) + bias)`.
///
/// Each color channel is convolved independently; alpha of convolved
/// pixels is 255.
///
/// # Example
///
/// ```
/// use pixel_filters::{Convolution, ConvolutionKernel, ImageFilter, PixelBuffer};
///
/// let source = PixelBuffer::filled(5, 5, [40, 80, 120, 255]);
/// let blurred = Convolution::from_kernel(ConvolutionKernel::BoxBlur).apply(&source);
///
/// // Blurring a flat image leaves it flat
/// assert_eq!(blurred, source);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Convolution {
    pub factor: f64,
    pub bias: f64,
    pub matrix: FilterMatrix,
    name: Option<String>,
}

impl Convolution {
    pub fn new(factor: f64, bias: f64, matrix: FilterMatrix) -> Self {
        Self {
            factor,
            bias,
            matrix,
            name: None,
        }
    }

    /// One of the built-in 3x3 kernels.
    pub fn from_kernel(kernel: ConvolutionKernel) -> Self {
        Self::new(kernel.factor(), kernel.bias(), kernel.matrix()).with_name(kernel.name())
    }

    /// Attach a display name, e.g. one chosen in a kernel editor.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl ImageFilter for Convolution {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        convolve(source, &self.matrix, self.factor, self.bias)
    }

    fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!(
                "Convolution {}x{}",
                self.matrix.width(),
                self.matrix.height()
            ),
        }
    }
}

/// Convolve the interior of `source` with `matrix`.
pub fn convolve(source: &PixelBuffer, matrix: &FilterMatrix, factor: f64, bias: f64) -> PixelBuffer {
    let mut output = source.to_packed();
    let width = source.width() as usize;
    let height = source.height() as usize;
    let (rx, ry) = (matrix.radius_x(), matrix.radius_y());

    if width < 2 * rx + 1 || height < 2 * ry + 1 {
        return output;
    }

    let cells: Vec<(usize, usize, f64)> = matrix.nonzero_cells().collect();
    let row_len = output.row_len();

    output
        .data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .filter(|(y, _)| *y >= ry && *y < height - ry)
        .for_each(|(y, row_out)| {
            for x in rx..width - rx {
                let mut sum = [0.0f64; 3];
                for &(ky, kx, weight) in &cells {
                    let src_row = source.row(y + ky - ry);
                    let i = (x + kx - rx) * BYTES_PER_PIXEL;
                    sum[0] += src_row[i + BLUE] as f64 * weight;
                    sum[1] += src_row[i + GREEN] as f64 * weight;
                    sum[2] += src_row[i + RED] as f64 * weight;
                }
                let o = x * BYTES_PER_PIXEL;
                row_out[o + BLUE] = clamp_byte(factor * sum[0] + bias);
                row_out[o + GREEN] = clamp_byte(factor * sum[1] + bias);
                row_out[o + RED] = clamp_byte(factor * sum[2] + bias);
                row_out[o + ALPHA] = 255;
            }
        });

    output
}
