//! High-level image operations.
//!
//! Planning turns a size label and its configured dimension string into a
//! [`ResizeParams`] without touching any pixels, so the watermark rules and
//! dimension parsing are testable on their own.

use super::params::{Quality, ResizeParams, WatermarkParams};
use crate::types::SizeLabel;
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid dimension {value:?}: {source}")]
    InvalidDimension {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("invalid dimension {0:?}: width must be greater than zero")]
    ZeroDimension(String),
    #[error("watermark requested but WATERMARK_FILE is not set")]
    MissingWatermark,
}

/// Parse a configured pixel width.
pub fn parse_dimension(value: &str) -> Result<u32, PlanError> {
    let width: u32 = value
        .parse()
        .map_err(|source| PlanError::InvalidDimension {
            value: value.to_string(),
            source,
        })?;
    if width == 0 {
        return Err(PlanError::ZeroDimension(value.to_string()));
    }
    Ok(width)
}

/// Plan one variant.
///
/// The watermark is attached only when `add_watermark` is set and the label
/// takes one (never `s`); its width is the label's scale percentage of the
/// resized output.
pub fn plan_variant(
    source: &Path,
    output: &Path,
    label: SizeLabel,
    dimension: &str,
    add_watermark: bool,
    watermark_file: Option<&Path>,
) -> Result<ResizeParams, PlanError> {
    let width = parse_dimension(dimension)?;

    let watermark = if add_watermark && label.takes_watermark() {
        let path = watermark_file.ok_or(PlanError::MissingWatermark)?;
        Some(WatermarkParams {
            path: path.to_path_buf(),
            scale_percent: label.watermark_scale_percent(),
        })
    } else {
        None
    };

    Ok(ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        quality: Quality::default(),
        watermark,
    })
}
