//! Image processing — pure Rust via the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (content sniffed, extension as fallback) |
//! | **Resize** | `resize_exact` + Lanczos3, height from the source aspect ratio |
//! | **Watermark** | `imageops::overlay`, centered, width relative to the output |
//! | **Encode** | format from the output extension |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Planning a variant from a size label and its configured width

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{centered_offset, height_for_width, watermark_width};
pub use operations::{PlanError, parse_dimension, plan_variant};
pub use params::{Quality, ResizeParams, WatermarkParams};
pub use rust_backend::RustBackend;
