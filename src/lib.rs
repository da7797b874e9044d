//! # Thumbwright
//!
//! Resize one image into fixed-width size variants, optionally stamp a
//! centered watermark on the larger ones, and hand the results to a
//! configured owner.
//!
//! ```text
//! thumbwright -a -w photo.jpg
//!
//! $OUTPUT_BASE_DIR/
//! ├── s/photo.jpg     # DIMENSION_S wide, never watermarked
//! ├── m/photo.jpg     # DIMENSION_M wide, watermark at 33% of the width
//! ├── l/photo.jpg     # DIMENSION_L wide, watermark at 66%
//! └── xl/photo.jpg    # DIMENSION_XL wide, watermark at 100%
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Env-file loading and the immutable [`config::Settings`] |
//! | [`types`] | Size labels, size selection, the per-run request |
//! | [`detect`] | Type gate: MIME sniffing through the `file` utility |
//! | [`imaging`] | Variant planning and pixel work on the `image` crate |
//! | [`ownership`] | `chown user:user` on every written variant |
//! | [`process`] | The pipeline: gate → per-size resize → ownership, producing a report |
//! | [`output`] | Terminal formatting of the run report |
//!
//! The external tools sit behind traits ([`detect::TypeDetector`],
//! [`ownership::OwnershipChanger`], [`imaging::ImageBackend`]) so
//! [`process::run_with`] can be driven entirely by fakes.

pub mod config;
pub mod detect;
pub mod imaging;
pub mod output;
pub mod ownership;
pub mod process;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
