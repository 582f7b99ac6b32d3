//! Error type for the pixel-filters public API.
//!
//! Every check happens before a filter touches pixel data: matrices and
//! region counts are validated when the filter is constructed, raw buffers
//! when they are wrapped. Applying a constructed filter cannot fail.

use thiserror::Error;

/// Color channel named in quantization errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Unified error type for buffer access and filter construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Pixel access outside the buffer. Correct iteration never produces this.
    #[error("pixel ({x}, {y}) is outside a {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Matrix with a zero or even dimension.
    #[error("kernel must have odd, non-zero dimensions (got {width}x{height})")]
    InvalidKernelShape { width: usize, height: usize },

    /// Diffusion matrix carrying weight at or before the anchor cell.
    #[error("diffusion kernel has weight at row {row}, column {col}, at or before the anchor")]
    NonCausalKernel { row: usize, col: usize },

    /// Quantization region count of zero.
    #[error("{channel} region count must not be zero")]
    DivideByZero { channel: Channel },

    /// Quantization region count that is negative or not a number.
    #[error("{channel} region count must be a positive number (got {count})")]
    InvalidRegionCount { channel: Channel, count: f64 },

    /// Raw pixel data whose length disagrees with `stride * height`.
    #[error("pixel data is {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Row stride too short to hold `width` BGRA pixels.
    #[error("stride {stride} is shorter than a row of pixels ({min} bytes)")]
    InvalidStride { stride: usize, min: usize },

    /// A chain was applied with no image loaded.
    #[error("no source image loaded")]
    NullSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = FilterError::OutOfBounds {
            x: 4,
            y: 0,
            width: 4,
            height: 2,
        };
        assert_eq!(err.to_string(), "pixel (4, 0) is outside a 4x2 buffer");
    }

    #[test]
    fn test_kernel_shape_message() {
        let err = FilterError::InvalidKernelShape {
            width: 2,
            height: 3,
        };
        assert_eq!(
            err.to_string(),
            "kernel must have odd, non-zero dimensions (got 2x3)"
        );
    }

    #[test]
    fn test_divide_by_zero_names_channel() {
        let err = FilterError::DivideByZero {
            channel: Channel::Green,
        };
        assert_eq!(err.to_string(), "green region count must not be zero");
    }

    #[test]
    fn test_null_source_message() {
        assert_eq!(FilterError::NullSource.to_string(), "no source image loaded");
    }
}
