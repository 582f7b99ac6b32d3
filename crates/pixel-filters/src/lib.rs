#![allow(
    clippy::needless_range_loop,
    clippy::excessive_precision,
    clippy::module_inception
)]

//! pixel-filters: pixel-level image filters over BGRA buffers
//!
//! The crate reads a [`PixelBuffer`] and produces a new one. Every filter is
//! a pure function of its input and its own immutable parameters, so a
//! [`FilterChain`] can re-run the whole pipeline from the original image
//! each time the list of filters changes.
//!
//! # Quick Start
//!
//! ```
//! use pixel_filters::{Filter, FilterChain, Invert, PixelBuffer};
//!
//! let original = PixelBuffer::filled(4, 4, [30, 60, 90, 255]);
//!
//! let mut chain = FilterChain::new();
//! chain.push(Invert);
//! chain.push(Filter::brightness(10));
//!
//! let result = chain.apply(Some(&original)).unwrap();
//! assert_eq!(result.pixel(0, 0).unwrap(), [235, 205, 175, 255]);
//! ```
//!
//! # Filters
//!
//! | Filter | Kind | Alpha |
//! |--------|------|-------|
//! | [`Invert`], [`Brightness`], [`Contrast`], [`Gamma`] | per pixel | 255 |
//! | [`Convolution`] | neighborhood | 255 inside, source on border |
//! | [`Dithering`] | error diffusion, sequential | 255 inside, source on border |
//! | [`YCbCrDithering`] | YCbCr requantization | 255 inside, source on border |
//! | [`UniformQuantization`] | whole-image region means | source |
//! | [`Grayscale`] | per pixel | source |
//! | [`YCbCrView`] | per pixel | 255 |
//!
//! Every output is packed (`stride == width * 4`), whatever the input
//! stride.
//!
//! # Border Policy
//!
//! Convolution and both dithering filters only process pixels whose whole
//! kernel neighborhood lies inside the image. Pixels within one kernel
//! radius of an edge are copied from the source unchanged:
//!
//! ```text
//!  3x3 kernel on a 6x5 image
//!
//!    B B B B B B
//!    B . . . . B       B = copied from source
//!    B . . . . B       . = filtered
//!    B . . . . B
//!    B B B B B B
//! ```
//!
//! # Errors
//!
//! Invalid parameters are rejected when a filter or matrix is built, never
//! while pixels are being written. See [`FilterError`].

pub mod buffer;
pub mod chain;
pub mod color;
pub mod convolution;
pub mod diffusion;
pub mod error;
pub mod filter;
pub mod kernel;
pub mod point;
pub mod quantize;


pub use buffer::PixelBuffer;
pub use chain::FilterChain;
pub use color::{ChannelWeights, Grayscale, Rgb, YCbCr, YCbCrView};
pub use convolution::Convolution;
pub use diffusion::{Dithering, YCbCrDithering};
pub use error::{Channel, FilterError};
pub use filter::{Filter, ImageFilter};
pub use kernel::{ConvolutionKernel, DiffusionKernel, FilterMatrix, UnknownConvolution, UnknownKernel};
pub use point::{Brightness, Contrast, Gamma, Invert};
pub use quantize::{RegionCounts, UniformQuantization};
