//! Kernel matrices for convolution and error diffusion.
//!
//! [`FilterMatrix`] is the shared numeric type. [`ConvolutionKernel`] and
//! [`DiffusionKernel`] name the built-in matrices.

mod convolution;
mod diffusion;
mod matrix;

pub use convolution::{ConvolutionKernel, UnknownConvolution};
pub use diffusion::{DiffusionKernel, UnknownKernel};
pub use matrix::FilterMatrix;
