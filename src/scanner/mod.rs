pub mod walker;

use std::path::{Path, PathBuf};

use crate::common::errors::DedupError;
use crate::common::progress;

pub use walker::{scan, ScanFilter, ScanOptions};

/// Fail early when a scan root is missing or not a directory
pub fn ensure_dir(root: &Path) -> Result<(), DedupError> {
    let meta = std::fs::metadata(root).map_err(|source| DedupError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    if meta.is_dir() {
        Ok(())
    } else {
        Err(DedupError::Io {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
        })
    }
}

/// Walk a whole tree into memory, in scan order
pub fn collect_files(
    root: &Path,
    filter: &ScanFilter,
    options: &ScanOptions,
    show_progress: bool,
) -> Vec<PathBuf> {
    let pb = progress::make_spinner(
        show_progress,
        &format!("Collecting files in {}...", root.display()),
    );
    let files: Vec<PathBuf> = scan(root, filter, options).collect();
    progress::finish_spinner(pb, &format!("Found {} files", files.len()));
    tracing::debug!("Collected {} files under {}", files.len(), root.display());
    files
}
