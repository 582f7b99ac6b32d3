//! Built-in 3x3 convolution kernels.

use std::fmt;
use std::str::FromStr;

use super::matrix::FilterMatrix;

/// Named convolution kernel with its factor and bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvolutionKernel {
    /// Box blur: mean of the 3x3 neighborhood.
    ///
    /// ```text
    ///    1   1   1
    ///    1   1   1
    ///    1   1   1     (x 1/9)
    /// ```
    BoxBlur,

    /// Gaussian blur approximation.
    ///
    /// ```text
    ///    1   2   1
    ///    2   4   2
    ///    1   2   1     (x 1/16)
    /// ```
    GaussianBlur,

    /// Sharpen.
    ///
    /// ```text
    ///    0  -1   0
    ///   -1   5  -1
    ///    0  -1   0
    /// ```
    Sharpen,

    /// Diagonal edge detection.
    ///
    /// ```text
    ///   -5   0   0
    ///    0   0   0
    ///    0   0   5
    /// ```
    EdgeDetection,

    /// Emboss, lifted to mid-gray by a bias of 128.
    ///
    /// ```text
    ///   -1   0   0
    ///    0   0   0
    ///    0   0   1     (+128)
    /// ```
    Emboss,
}

impl ConvolutionKernel {
    pub const ALL: [ConvolutionKernel; 5] = [
        ConvolutionKernel::BoxBlur,
        ConvolutionKernel::GaussianBlur,
        ConvolutionKernel::Sharpen,
        ConvolutionKernel::EdgeDetection,
        ConvolutionKernel::Emboss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConvolutionKernel::BoxBlur => "blur",
            ConvolutionKernel::GaussianBlur => "gaussian-blur",
            ConvolutionKernel::Sharpen => "sharpen",
            ConvolutionKernel::EdgeDetection => "edge-detection",
            ConvolutionKernel::Emboss => "emboss",
        }
    }

    /// Multiplier applied to the weighted sum.
    pub fn factor(self) -> f64 {
        match self {
            ConvolutionKernel::BoxBlur => 1.0 / 9.0,
            ConvolutionKernel::GaussianBlur => 1.0 / 16.0,
            _ => 1.0,
        }
    }

    /// Offset added after scaling.
    pub fn bias(self) -> f64 {
        match self {
            ConvolutionKernel::Emboss => 128.0,
            _ => 0.0,
        }
    }

    pub fn matrix(self) -> FilterMatrix {
        let weights: [f64; 9] = match self {
            ConvolutionKernel::BoxBlur => [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            ConvolutionKernel::GaussianBlur => [1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0],
            ConvolutionKernel::Sharpen => [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
            ConvolutionKernel::EdgeDetection => [-5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0],
            ConvolutionKernel::Emboss => [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        };
        FilterMatrix::from_static(3, 3, &weights)
    }
}

impl fmt::Display for ConvolutionKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised convolution kernel name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown convolution kernel '{0}'")]
pub struct UnknownConvolution(pub String);

impl FromStr for ConvolutionKernel {
    type Err = UnknownConvolution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConvolutionKernel::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownConvolution(s.to_string()))
    }
}
