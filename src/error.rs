//! Error handling for HL7 extraction operations.
//!
//! Separates run-fatal failures (specification loading, configuration,
//! interruption) from per-message failures (format and decode errors) so the
//! batch orchestrator can isolate one bad message from the rest of the batch.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load specification {path}: {reason}")]
    SpecLoad { path: PathBuf, reason: String },

    #[error("Message format error: {reason}")]
    Format { reason: String },

    #[error("Decode failed for {origin}: {reason}")]
    Decode { origin: String, reason: String },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a specification loading error
    pub fn spec_load(path: &Path, reason: impl Into<String>) -> Self {
        Self::SpecLoad {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a message format error
    pub fn format(reason: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }

    /// Create a decode error for a message from the given origin
    pub fn decode(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// Create a CSV error tied to a file
    pub fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether this error must abort the whole run rather than a single message
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SpecLoad { .. } | Self::Configuration { .. } | Self::ProcessingInterrupted { .. }
        )
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for ExtractError {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
