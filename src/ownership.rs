//! Hand written variants over to the configured owner.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OwnershipError {
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
    #[error("Failed to change ownership: {status}, output: {output}")]
    Failed {
        status: std::process::ExitStatus,
        output: String,
    },
}

/// Changes the owning user and group of a file.
pub trait OwnershipChanger {
    fn change_owner(&self, path: &Path, user: &str) -> Result<(), OwnershipError>;
}

/// `chown <user>:<user> <path>`
#[derive(Debug, Clone, Default)]
pub struct Chown;

impl Chown {
    const PROGRAM: &'static str = "chown";

    pub fn new() -> Self {
        Self
    }
}

/// Owner spec that sets both user and group to `user`.
pub fn owner_spec(user: &str) -> String {
    format!("{user}:{user}")
}

impl OwnershipChanger for Chown {
    fn change_owner(&self, path: &Path, user: &str) -> Result<(), OwnershipError> {
        let program = which::which(Self::PROGRAM).map_err(|source| OwnershipError::NotFound {
            program: Self::PROGRAM,
            source,
        })?;
        let output = Command::new(&program)
            .arg(owner_spec(user))
            .arg(path)
            .output()
            .map_err(|source| OwnershipError::Launch {
                program: program.clone(),
                source,
            })?;
        if output.status.success() {
            return Ok(());
        }
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Err(OwnershipError::Failed {
            status: output.status,
            output: combined.trim().to_string(),
        })
    }
}
