//! pixfilt - pixel filter chains for PNG images
//!
//! Application shell around the `pixel-filters` engine: PNG I/O, chain
//! configuration, the preset catalogue and the editing session.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod presets;
pub mod rendering;
pub mod services;
