use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::common::errors::DedupError;
use crate::duplicates::metadata;

/// Outcome of removing a batch of duplicates
#[derive(Debug, Clone, Default, Serialize)]
pub struct PurgeReport {
    /// Files removed, or that would be removed in a dry run, in deletion order
    pub deleted: Vec<PathBuf>,
    /// Bytes freed (or that would be freed)
    pub bytes_freed: u64,
    /// Per-file failures; the batch continues past each one
    pub errors: Vec<String>,
}

/// Remove a single file, returning its size
///
/// In a dry run nothing is touched, but the size is still reported.
pub fn remove_file(path: &Path, dry_run: bool) -> Result<u64, DedupError> {
    let size = metadata::try_file_size(path).unwrap_or(0);

    if dry_run {
        tracing::info!("Would delete: {}", path.display());
        return Ok(size);
    }

    std::fs::remove_file(path).map_err(|source| DedupError::Delete {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Deleted: {}", path.display());
    Ok(size)
}

/// Remove every path in order, logging and skipping failures
pub fn purge_files<I>(paths: I, dry_run: bool) -> PurgeReport
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut report = PurgeReport::default();

    for path in paths {
        match remove_file(&path, dry_run) {
            Ok(size) => {
                report.bytes_freed += size;
                report.deleted.push(path);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                report.errors.push(e.to_string());
            }
        }
    }

    report
}
