//! Archive layout and source file moves

use crate::config::ExtractConfig;
use crate::{ExtractError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Create the Original, Modified, and Reports directories
pub async fn ensure_archive_dirs(config: &ExtractConfig) -> Result<()> {
    for dir in [
        config.original_dir(),
        config.modified_dir(),
        config.reports_dir(),
    ] {
        fs::create_dir_all(&dir).await.map_err(|e| {
            ExtractError::io(
                format!("Failed to create archive directory: {}", dir.display()),
                e,
            )
        })?;
    }
    Ok(())
}

/// Move a processed source file into `original_dir`, keeping its name
///
/// Falls back to copy and remove when a rename is not possible, for example
/// across filesystems. An existing file of the same name is replaced.
pub async fn archive_original(source: &Path, original_dir: &Path) -> Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        ExtractError::io(
            format!("Source has no file name: {}", source.display()),
            std::io::Error::from(std::io::ErrorKind::InvalidInput),
        )
    })?;
    let destination = original_dir.join(file_name);

    if let Err(rename_error) = fs::rename(source, &destination).await {
        debug!(
            "Rename of {} failed ({}), copying instead",
            source.display(),
            rename_error
        );
        fs::copy(source, &destination).await.map_err(|e| {
            ExtractError::io(
                format!("Failed to archive {} to {}", source.display(), destination.display()),
                e,
            )
        })?;
        fs::remove_file(source).await.map_err(|e| {
            ExtractError::io(format!("Failed to remove {}", source.display()), e)
        })?;
    }

    debug!("Archived {} to {}", source.display(), destination.display());
    Ok(destination)
}
