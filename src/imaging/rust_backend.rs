//! Pure Rust image processing backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, BMP, TIFF, WebP) | `image::ImageReader` with format guessing |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Watermark | `image::imageops::overlay`, alpha-blended, centered |
//! | Encode | format inferred from the output extension; JPEG through `JpegEncoder` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{centered_offset, height_for_width, watermark_width};
use super::params::{Quality, ResizeParams};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk, trusting content over extension.
fn load_image(path: &Path) -> Result<DynamicImage, String> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| format!("{}: {}", path.display(), e))?
        .decode()
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// Resize to `width`, keeping the aspect ratio.
fn resize_to_width(img: &DynamicImage, width: u32) -> DynamicImage {
    let height = height_for_width(img.dimensions(), width);
    img.resize_exact(width, height, FilterType::Lanczos3)
}

/// Overlay `mark` centered on `base` at `scale_percent` of the base width.
///
/// The overlay is alpha-blended at full opacity and clipped at the edges.
/// An opaque base stays opaque.
fn overlay_centered(base: DynamicImage, mark: &DynamicImage, scale_percent: u32) -> DynamicImage {
    let mark = resize_to_width(mark, watermark_width(base.width(), scale_percent)).to_rgba8();
    let (x, y) = centered_offset(base.dimensions(), mark.dimensions());

    let keep_alpha = base.color().has_alpha();
    let mut canvas = base.to_rgba8();
    imageops::overlay(&mut canvas, &mark, x, y);

    let blended = DynamicImage::ImageRgba8(canvas);
    if keep_alpha {
        blended
    } else {
        DynamicImage::ImageRgb8(blended.to_rgb8())
    }
}

/// Save a DynamicImage to the given path, inferring format from extension.
fn save_image(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let format = ImageFormat::from_path(path)
        .map_err(|e| BackendError::Encode(format!("{}: {}", path.display(), e)))?;

    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoded = match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel and no 16-bit mode.
            let flat = match img {
                DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(img),
                other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
            };
            let encoder = JpegEncoder::new_with_quality(&mut writer, quality.value() as u8);
            flat.write_with_encoder(encoder)
        }
        other => img.write_to(&mut writer, other),
    };
    encoded.map_err(|e| BackendError::Encode(format!("{}: {}", path.display(), e)))?;
    writer.flush()?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError> {
        let source = load_image(&params.source).map_err(BackendError::Decode)?;
        let mut resized = resize_to_width(&source, params.width);
        drop(source);

        if let Some(watermark) = &params.watermark {
            let mark = load_image(&watermark.path).map_err(BackendError::Watermark)?;
            resized = overlay_centered(resized, &mark, watermark.scale_percent);
        }

        save_image(&resized, &params.output, params.quality)?;
        Ok(Dimensions {
            width: resized.width(),
            height: resized.height(),
        })
    }
}
