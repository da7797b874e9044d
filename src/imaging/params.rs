//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between [`operations`](super::operations) (which decides what a
//! variant looks like) and the [`backend`](super::backend) (which does the
//! pixel work), so the backend can be swapped for a mock in tests.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (default 95).
//! - [`WatermarkParams`] — Watermark file plus its width as a percentage of the output width.
//! - [`ResizeParams`] — Full specification for one variant: source, output, target width, quality, optional watermark.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// Watermark overlay for a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkParams {
    pub path: PathBuf,
    /// Width of the overlay relative to the resized output, in percent.
    pub scale_percent: u32,
}

/// Parameters for a single variant: resize to `width`, height follows the
/// source aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub quality: Quality,
    pub watermark: Option<WatermarkParams>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_default_is_95() {
        assert_eq!(Quality::default().value(), 95);
    }
}
