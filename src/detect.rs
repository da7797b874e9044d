//! Type gate: decide whether the input is an image before any work happens.
//!
//! Detection is delegated to the system `file` utility through the
//! [`TypeDetector`] trait so the pipeline can be exercised with a fake.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("`{program}` not found on PATH: {source}")]
    NotFound {
        program: &'static str,
        #[source]
        source: which::Error,
    },
    #[error("Failed to run {program}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Reports the MIME type of a file.
pub trait TypeDetector {
    fn mime_type(&self, path: &Path) -> Result<String, DetectError>;
}

/// `file --mime-type -b <path>`
#[derive(Debug, Clone, Default)]
pub struct FileCommand;

impl FileCommand {
    const PROGRAM: &'static str = "file";

    pub fn new() -> Self {
        Self
    }
}

impl TypeDetector for FileCommand {
    fn mime_type(&self, path: &Path) -> Result<String, DetectError> {
        let program = which::which(Self::PROGRAM).map_err(|source| DetectError::NotFound {
            program: Self::PROGRAM,
            source,
        })?;
        let output = Command::new(&program)
            .args(["--mime-type", "-b"])
            .arg(path)
            .output()
            .map_err(|source| DetectError::Launch {
                program: program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(DetectError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let mime = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(path = %path.display(), mime = %mime, "Detected MIME type");
        Ok(mime)
    }
}

/// True when the detected MIME type mentions `image`.
pub fn is_image(detector: &impl TypeDetector, path: &Path) -> Result<bool, DetectError> {
    Ok(detector.mime_type(path)?.contains("image"))
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::test_helpers::create_test_jpeg;

    /// Detector that always reports the same MIME type.
    pub struct FixedMime(pub &'static str);

    impl TypeDetector for FixedMime {
        fn mime_type(&self, _path: &Path) -> Result<String, DetectError> {
            Ok(self.0.to_string())
        }
    }

    /// Detector whose tool can never be launched.
    pub struct BrokenDetector;

    impl TypeDetector for BrokenDetector {
        fn mime_type(&self, _path: &Path) -> Result<String, DetectError> {
            Err(DetectError::Launch {
                program: PathBuf::from("file"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            })
        }
    }

    #[test]
    fn image_mime_types_pass() {
        let path = Path::new("photo.jpg");
        assert!(is_image(&FixedMime("image/jpeg"), path).unwrap());
        assert!(is_image(&FixedMime("image/png"), path).unwrap());
    }

    #[test]
    fn other_mime_types_fail() {
        let path = Path::new("notes.txt");
        assert!(!is_image(&FixedMime("text/plain"), path).unwrap());
        assert!(!is_image(&FixedMime("inode/x-empty"), path).unwrap());
    }

    #[test]
    fn launch_failure_propagates() {
        let result = is_image(&BrokenDetector, Path::new("photo.jpg"));
        assert!(matches!(result, Err(DetectError::Launch { .. })));
    }

    #[test]
    fn file_command_detects_real_files() {
        if which::which("file").is_err() {
            eprintln!("skipping: `file` is not installed");
            return;
        }
        let tmp = tempfile::TempDir::new().unwrap();
        let jpeg = tmp.path().join("photo.jpg");
        create_test_jpeg(&jpeg, 32, 24);
        let text = tmp.path().join("notes.txt");
        std::fs::write(&text, "just some words\n").unwrap();

        let detector = FileCommand::new();
        assert!(is_image(&detector, &jpeg).unwrap());
        assert!(!is_image(&detector, &text).unwrap());
    }
}
