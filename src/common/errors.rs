use std::path::PathBuf;

use thiserror::Error;

/// Error types for hfrdup operations.
///
/// We use `anyhow` at the top level for CLI error handling, but these typed
/// errors let the engine be precise about failures. `Hash`, `Stat`,
/// `UnloggablePath` and `Delete` are per-file: they are logged and recorded
/// in a report, and the traversal moves on. The rest abort the operation
/// before any side effect.
#[derive(Debug, Error)]
pub enum DedupError {
    /// File could not be read while fingerprinting
    #[error("Hash error for '{}': {source}", path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Size or creation time lookup failed
    #[error("Stat error for '{}': {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path cannot round-trip through the line-based duplicate log
    #[error("Path {path:?} cannot be recorded in the duplicate log; left out")]
    UnloggablePath { path: PathBuf },

    /// Filesystem refused to remove a file
    #[error("Error deleting '{}': {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mode-specific flag was not supplied
    #[error("{flag} is required for '{mode}'")]
    MissingArgument {
        mode: &'static str,
        flag: &'static str,
    },

    /// Name filter is not a valid regular expression
    #[error("Invalid name pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Reference and target trees share files
    #[error(
        "Source '{}' and target '{}' overlap; refusing to delete by reference",
        source_root.display(),
        target_root.display()
    )]
    OverlappingScopes {
        source_root: PathBuf,
        target_root: PathBuf,
    },

    /// File system operation failed (log files, directory walk)
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_message() {
        let err = DedupError::MissingArgument {
            mode: "find",
            flag: "-o/--output",
        };
        assert_eq!(err.to_string(), "-o/--output is required for 'find'");
    }

    #[test]
    fn test_delete_error_names_path() {
        let err = DedupError::Delete {
            path: PathBuf::from("/tmp/x"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/tmp/x"));
    }

    #[test]
    fn test_unloggable_path_is_escaped() {
        let err = DedupError::UnloggablePath {
            path: PathBuf::from("/tmp/b.txt\nDUPLICATE keep.txt"),
        };
        let msg = err.to_string();
        assert!(!msg.contains('\n'), "Message must stay on one line: {}", msg);
        assert!(msg.contains("keep.txt"));
    }
}
