//! Run the whole pipeline for one input file.
//!
//! ```text
//! type gate  →  for label in s, m, l, xl:
//!                   skip if disabled or no dimension
//!                   mkdir <base>/<label>
//!                   plan → resize (+ watermark) → save
//!                   chown <user>:<user>
//! ```
//!
//! ## Failure tiers
//!
//! Returned as [`ProcessError`] (the run stops):
//! - the type gate cannot run, or says the input is not an image
//! - an output directory cannot be created
//!
//! Recorded in the [`RunReport`] and logged (the loop moves on):
//! - bad dimension, missing watermark file, decode/encode failures
//! - ownership changes that fail
//!
//! Sizes are processed one at a time and the source is decoded again for
//! every size.

use crate::config::Settings;
use crate::detect::{self, DetectError, FileCommand, TypeDetector};
use crate::imaging::{ImageBackend, RustBackend, plan_variant};
use crate::ownership::{Chown, OwnershipChanger};
use crate::types::{Request, SizeLabel};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to determine file type: {0}")]
    Detect(#[from] DetectError),
    #[error("File {0} is not a valid image")]
    NotAnImage(PathBuf),
    #[error("Input path {0} has no file name")]
    NoFileName(PathBuf),
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What happened to one enabled size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SizeStatus {
    Written {
        output: PathBuf,
        width: u32,
        height: u32,
        watermarked: bool,
        owner_changed: bool,
        elapsed_ms: u64,
    },
    Skipped {
        reason: String,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeOutcome {
    pub label: SizeLabel,
    #[serde(flatten)]
    pub status: SizeStatus,
}

/// Result of a completed run, one outcome per enabled size in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub input: PathBuf,
    pub sizes: Vec<SizeOutcome>,
}

impl RunReport {
    pub fn written(&self) -> usize {
        self.sizes
            .iter()
            .filter(|s| matches!(s.status, SizeStatus::Written { .. }))
            .count()
    }

    pub fn outcome(&self, label: SizeLabel) -> Option<&SizeStatus> {
        self.sizes
            .iter()
            .find(|s| s.label == label)
            .map(|s| &s.status)
    }
}

/// Run with the production collaborators: `image` crate, `file`, `chown`.
pub fn run(settings: &Settings, request: &Request) -> Result<RunReport, ProcessError> {
    run_with(
        &RustBackend::new(),
        &FileCommand::new(),
        &Chown::new(),
        settings,
        request,
    )
}

/// Run with injected collaborators (allows testing with mocks).
pub fn run_with(
    backend: &impl ImageBackend,
    detector: &impl TypeDetector,
    owner: &impl OwnershipChanger,
    settings: &Settings,
    request: &Request,
) -> Result<RunReport, ProcessError> {
    let input = &request.input;
    info!(file = %input.display(), "Processing file");

    if !detect::is_image(detector, input)? {
        return Err(ProcessError::NotAnImage(input.clone()));
    }
    let file_name = input
        .file_name()
        .ok_or_else(|| ProcessError::NoFileName(input.clone()))?;

    if request.sizes.is_empty() {
        warn!("No sizes selected, nothing to do");
    }
    if request.watermark && settings.watermark_file.is_none() {
        warn!("Watermarking requested but WATERMARK_FILE is not set");
    }

    let mut report = RunReport {
        input: input.clone(),
        sizes: Vec::new(),
    };

    for label in request.sizes.iter() {
        let Some(dimension) = settings.dimension(label) else {
            warn!("No dimension found for size {label}. Skipping.");
            report.sizes.push(SizeOutcome {
                label,
                status: SizeStatus::Skipped {
                    reason: "no dimension configured".to_string(),
                },
            });
            continue;
        };

        let output_dir = settings.output_dir(label);
        let output = output_dir.join(file_name);
        create_output_dir(&output_dir).map_err(|source| ProcessError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;

        let started = Instant::now();
        info!(
            "Processing {} as {label} ({dimension} pixels)",
            input.display()
        );

        let status = match process_size(backend, settings, request, label, dimension, &output) {
            Ok((width, height, watermarked)) => {
                let elapsed = started.elapsed();
                info!(
                    "Successfully processed {} as {label} in {elapsed:?}",
                    input.display()
                );
                let owner_changed = change_ownership(owner, &output, &settings.owner_user);
                SizeStatus::Written {
                    output,
                    width,
                    height,
                    watermarked,
                    owner_changed,
                    elapsed_ms: elapsed.as_millis() as u64,
                }
            }
            Err(e) => {
                error!("Failed to process {} as {label}: {e}", input.display());
                SizeStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        report.sizes.push(SizeOutcome { label, status });
    }

    Ok(report)
}

/// Plan and execute one variant. Returns `(width, height, watermarked)`.
fn process_size(
    backend: &impl ImageBackend,
    settings: &Settings,
    request: &Request,
    label: SizeLabel,
    dimension: &str,
    output: &Path,
) -> Result<(u32, u32, bool), Box<dyn std::error::Error>> {
    let params = plan_variant(
        &request.input,
        output,
        label,
        dimension,
        request.watermark,
        settings.watermark_file.as_deref(),
    )?;
    let dims = backend.resize(&params)?;
    info!(output = %output.display(), "Image saved");
    Ok((dims.width, dims.height, params.watermark.is_some()))
}

/// Failures are logged, never propagated.
fn change_ownership(owner: &impl OwnershipChanger, path: &Path, user: &str) -> bool {
    match owner.change_owner(path, user) {
        Ok(()) => {
            info!("Ownership changed for {} to {user}", path.display());
            true
        }
        Err(e) => {
            error!("Failed to change ownership for {}: {e}", path.display());
            false
        }
    }
}

fn create_output_dir(path: &Path) -> std::io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}
