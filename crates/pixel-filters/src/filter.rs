//! The filter trait and the closed set of filter variants.

use crate::buffer::PixelBuffer;
use crate::color::{ChannelWeights, Grayscale, YCbCrView};
use crate::convolution::Convolution;
use crate::diffusion::{Dithering, YCbCrDithering};
use crate::error::FilterError;
use crate::kernel::FilterMatrix;
use crate::point::{Brightness, Contrast, Gamma, Invert};
use crate::quantize::{RegionCounts, UniformQuantization};

/// A pure transform from one pixel buffer to a new one.
///
/// Implementations borrow the source read-only and always return a packed
/// buffer (`stride == width * 4`) of the same dimensions. Configuration is
/// fixed at construction, so applying a filter cannot fail.
pub trait ImageFilter {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer;

    /// Human-readable name for lists and logs.
    fn label(&self) -> String;
}

/// Any filter the engine provides.
///
/// Variants wrap the concrete filter types, which validate their own
/// parameters. Use the `From` impls or the helper constructors to build one.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Invert(Invert),
    Brightness(Brightness),
    Contrast(Contrast),
    Gamma(Gamma),
    Convolution(Convolution),
    Dithering(Dithering),
    YCbCrDithering(YCbCrDithering),
    UniformQuantization(UniformQuantization),
    Grayscale(Grayscale),
    YCbCrView(YCbCrView),
}

impl Filter {
    pub fn brightness(amount: i32) -> Self {
        Filter::Brightness(Brightness::new(amount))
    }

    pub fn contrast(amount: f64) -> Self {
        Filter::Contrast(Contrast::new(amount))
    }

    pub fn gamma(gamma: f64, c: f64) -> Self {
        Filter::Gamma(Gamma::new(gamma, c))
    }

    pub fn convolution(factor: f64, bias: f64, matrix: FilterMatrix) -> Self {
        Filter::Convolution(Convolution::new(factor, bias, matrix))
    }

    pub fn dithering(matrix: FilterMatrix, weights: ChannelWeights) -> Result<Self, FilterError> {
        Ok(Filter::Dithering(Dithering::new(matrix, weights)?))
    }

    pub fn uniform_quantization(regions: RegionCounts) -> Result<Self, FilterError> {
        Ok(Filter::UniformQuantization(UniformQuantization::new(
            regions,
        )?))
    }

    fn as_filter(&self) -> &dyn ImageFilter {
        match self {
            Filter::Invert(f) => f,
            Filter::Brightness(f) => f,
            Filter::Contrast(f) => f,
            Filter::Gamma(f) => f,
            Filter::Convolution(f) => f,
            Filter::Dithering(f) => f,
            Filter::YCbCrDithering(f) => f,
            Filter::UniformQuantization(f) => f,
            Filter::Grayscale(f) => f,
            Filter::YCbCrView(f) => f,
        }
    }
}

impl ImageFilter for Filter {
    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        self.as_filter().apply(source)
    }

    fn label(&self) -> String {
        self.as_filter().label()
    }
}

macro_rules! impl_from_filter {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Filter {
                fn from(f: $variant) -> Self {
                    Filter::$variant(f)
                }
            }
        )*
    };
}

impl_from_filter!(
    Invert,
    Brightness,
    Contrast,
    Gamma,
    Convolution,
    Dithering,
    YCbCrDithering,
    UniformQuantization,
    Grayscale,
    YCbCrView,
);
