//! Intake discovery
//!
//! Finds the message files waiting in the intake directory. Only files
//! directly inside the directory with the intake extension are picked up.

use crate::constants::INTAKE_EXTENSION;
use crate::{ExtractError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File discovery component for the intake directory
#[derive(Debug, Clone)]
pub struct IntakeDiscovery {
    intake_dir: PathBuf,
    extension: String,
}

impl IntakeDiscovery {
    pub fn new(intake_dir: impl Into<PathBuf>) -> Self {
        Self {
            intake_dir: intake_dir.into(),
            extension: INTAKE_EXTENSION.to_string(),
        }
    }

    pub fn intake_dir(&self) -> &Path {
        &self.intake_dir
    }

    /// Glob pattern matching intake files; the directory part is escaped
    pub fn pattern(&self) -> String {
        let dir = glob::Pattern::escape(&self.intake_dir.to_string_lossy());
        format!("{}/*.{}", dir.trim_end_matches('/'), self.extension)
    }

    /// Intake message files in name order
    ///
    /// # Errors
    /// * `ExtractError::Configuration` if the intake directory is missing or
    ///   the pattern cannot be built
    /// * `ExtractError::Io` if a matched entry cannot be read
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.intake_dir.is_dir() {
            return Err(ExtractError::configuration(format!(
                "Intake directory does not exist: {}",
                self.intake_dir.display()
            )));
        }

        let pattern = self.pattern();
        debug!("Searching for intake files: {}", pattern);

        let entries = glob::glob(&pattern).map_err(|e| {
            ExtractError::configuration(format!("Invalid intake pattern '{}': {}", pattern, e))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| {
                let message = format!("Failed to read intake entry {}", e.path().display());
                ExtractError::io(message, e.into_error())
            })?;
            if path.is_file() {
                files.push(path);
            }
        }

        files.sort();
        debug!("Found {} intake files", files.len());
        Ok(files)
    }
}
