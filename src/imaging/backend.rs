//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait has a single operation: produce one variant
//! from a [`ResizeParams`]. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use the recording
//! [`MockBackend`](tests::MockBackend).

use super::params::ResizeParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to open input image: {0}")]
    Decode(String),
    #[error("Failed to open watermark image: {0}")]
    Watermark(String),
    #[error("Failed to save output image: {0}")]
    Encode(String),
}

/// Pixel size of a written variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode `params.source`, resize, optionally watermark, and save to
    /// `params.output`. Returns the dimensions of the saved image.
    fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError>;
}
