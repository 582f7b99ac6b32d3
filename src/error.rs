use pixel_filters::{FilterError, UnknownConvolution, UnknownKernel};
use thiserror::Error;

use crate::presets::UnknownPreset;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    UnknownPreset(#[from] UnknownPreset),

    #[error(transparent)]
    UnknownKernel(#[from] UnknownKernel),

    #[error(transparent)]
    UnknownConvolution(#[from] UnknownConvolution),
}
