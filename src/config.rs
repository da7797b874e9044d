//! Run configuration loaded from an env file and the process environment.
//!
//! ## Keys
//!
//! ```text
//! OUTPUT_BASE_DIR=/srv/media   # required, variants land in <dir>/<label>/
//! OWNER_USER=www-data          # required, written files are chowned to user:user
//! WATERMARK_FILE=mark.png      # optional, only read when -w is given
//! DIMENSION_S=100              # optional pixel widths; an empty value
//! DIMENSION_M=500              # skips that size with a warning
//! DIMENSION_L=
//! DIMENSION_XL=
//! ```
//!
//! Values already present in the process environment win over the file.
//! Loading never writes to the process environment; the merged view lives in
//! [`EnvSource`] and is turned into an immutable [`Settings`] once.

use crate::types::SizeLabel;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Env-file values layered under the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    file_vars: HashMap<String, String>,
}

impl EnvSource {
    /// Read every `KEY=value` pair from `path`.
    ///
    /// A missing or malformed file is an error: the run cannot be configured
    /// without it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading environment variables");
        let to_err = |source: dotenvy::Error| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        };
        let mut file_vars = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(to_err)? {
            let (key, value) = item.map_err(to_err)?;
            file_vars.insert(key, value);
        }
        Ok(Self { file_vars })
    }

    /// Process environment first, then the env file.
    pub fn get(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .or_else(|| self.file_vars.get(key).cloned())
    }

    /// Value from the env file only, ignoring the process environment.
    #[cfg(test)]
    pub(crate) fn file_value(&self, key: &str) -> Option<&str> {
        self.file_vars.get(key).map(String::as_str)
    }
}

/// Immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output_base_dir: PathBuf,
    pub owner_user: String,
    pub watermark_file: Option<PathBuf>,
    dimensions: [Option<String>; 4],
}

impl Settings {
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| source.get(key))
    }

    /// Build settings from any key lookup.
    ///
    /// `OUTPUT_BASE_DIR` and `OWNER_USER` must be present and non-empty.
    /// Empty optional values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            match lookup(key) {
                Some(value) if !value.is_empty() => {
                    info!("Loaded environment variable: {key}={value}");
                    Ok(value)
                }
                _ => Err(ConfigError::MissingVar(key)),
            }
        };
        let optional = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let output_base_dir = PathBuf::from(required("OUTPUT_BASE_DIR")?);
        let owner_user = required("OWNER_USER")?;
        let watermark_file = optional("WATERMARK_FILE").map(PathBuf::from);
        let dimensions = SizeLabel::ALL.map(|label| optional(label.dimension_key()));

        Ok(Self {
            output_base_dir,
            owner_user,
            watermark_file,
            dimensions,
        })
    }

    /// Configured pixel width string for `label`, if any.
    pub fn dimension(&self, label: SizeLabel) -> Option<&str> {
        self.dimensions[label as usize].as_deref()
    }

    /// Directory that receives variants for `label`.
    pub fn output_dir(&self, label: SizeLabel) -> PathBuf {
        self.output_base_dir.join(label.as_str())
    }

    #[cfg(test)]
    pub(crate) fn with_dimension(mut self, label: SizeLabel, value: impl Into<String>) -> Self {
        let value = value.into();
        self.dimensions[label as usize] = (!value.is_empty()).then_some(value);
        self
    }
}
