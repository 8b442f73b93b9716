//! Configuration management and validation.
//!
//! Provides the run configuration for a batch extraction: intake and archive
//! locations, the specification resource, decoding options, and concurrency
//! limits.

use crate::constants::{
    DEFAULT_ARCHIVE_DIR, DEFAULT_HL7_VERSION, DEFAULT_SPEC_PATH, MODIFIED_DIR_NAME,
    ORIGINAL_DIR_NAME, REPORTS_DIR_NAME,
};
use crate::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Directory holding incoming `.txt` message files
    pub intake_dir: PathBuf,

    /// Archive root receiving originals, extracts, and reports
    pub archive_dir: PathBuf,

    /// JSON specification resource
    pub spec_path: PathBuf,

    /// Version used when a header's version token is missing or unknown
    pub default_version: String,

    /// Emit only fields marked required
    pub required_only: bool,

    /// Maximum concurrent file processing
    pub max_concurrent_files: usize,

    /// List the work without decoding or moving anything
    pub dry_run: bool,

    /// Write the state billing report after the batch
    pub write_report: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            intake_dir: PathBuf::new(),
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            spec_path: PathBuf::from(DEFAULT_SPEC_PATH),
            default_version: DEFAULT_HL7_VERSION.to_string(),
            required_only: false,
            max_concurrent_files: num_cpus::get(),
            dry_run: false,
            write_report: true,
        }
    }
}

impl ExtractConfig {
    /// Create configuration for an intake directory with default settings
    pub fn new(intake_dir: impl Into<PathBuf>) -> Self {
        Self {
            intake_dir: intake_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_archive_dir(mut self, archive_dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = archive_dir.into();
        self
    }

    pub fn with_spec_path(mut self, spec_path: impl Into<PathBuf>) -> Self {
        self.spec_path = spec_path.into();
        self
    }

    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.default_version = version.into();
        self
    }

    /// Restrict decoded fields to those marked required
    pub fn with_required_only(mut self, required_only: bool) -> Self {
        self.required_only = required_only;
        self
    }

    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Skip the billing report after the batch
    pub fn without_report(mut self) -> Self {
        self.write_report = false;
        self
    }

    /// Archive subdirectory for processed source messages
    pub fn original_dir(&self) -> PathBuf {
        self.archive_dir.join(ORIGINAL_DIR_NAME)
    }

    /// Archive subdirectory for CSV extracts
    pub fn modified_dir(&self) -> PathBuf {
        self.archive_dir.join(MODIFIED_DIR_NAME)
    }

    /// Archive subdirectory for reports
    pub fn reports_dir(&self) -> PathBuf {
        self.archive_dir.join(REPORTS_DIR_NAME)
    }

    /// Check the configuration before any file is touched
    ///
    /// # Errors
    /// * `ExtractError::Configuration` when the intake directory is missing,
    ///   the specification file does not exist, the default version is blank,
    ///   or the concurrency limit is zero
    pub fn validate(&self) -> Result<()> {
        if self.intake_dir.as_os_str().is_empty() {
            return Err(ExtractError::configuration("Intake directory is required"));
        }
        require_dir(&self.intake_dir, "Intake directory")?;

        if !self.spec_path.is_file() {
            return Err(ExtractError::configuration(format!(
                "Specification file not found: {}",
                self.spec_path.display()
            )));
        }

        if self.default_version.trim().is_empty() {
            return Err(ExtractError::configuration("Default HL7 version cannot be empty"));
        }

        if self.max_concurrent_files == 0 {
            return Err(ExtractError::configuration(
                "Maximum concurrent files must be at least 1",
            ));
        }

        if self.archive_dir.exists() && !self.archive_dir.is_dir() {
            return Err(ExtractError::configuration(format!(
                "Archive path is not a directory: {}",
                self.archive_dir.display()
            )));
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}

fn require_dir(path: &Path, label: &str) -> Result<()> {
    if !path.exists() {
        return Err(ExtractError::configuration(format!(
            "{} does not exist: {}",
            label,
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(ExtractError::configuration(format!(
            "{} is not a directory: {}",
            label,
            path.display()
        )));
    }
    Ok(())
}
