use serde::{Serialize, Serializer};
use std::fs::Metadata;
use std::path::Path;
use std::time::SystemTime;

use crate::common::errors::DedupError;

/// Size reported when a file's metadata cannot be read
pub const UNKNOWN_SIZE: i64 = -1;

/// Creation timestamp of a file.
///
/// `Unknown` sorts after every known time, so a file whose creation time
/// cannot be determined is never preferred as the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CreatedAt {
    Known(SystemTime),
    Unknown,
}

impl Serialize for CreatedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CreatedAt::Known(time) => {
                let utc: chrono::DateTime<chrono::Utc> = (*time).into();
                serializer.serialize_some(&utc)
            }
            CreatedAt::Unknown => serializer.serialize_none(),
        }
    }
}

/// Size of a file in bytes
pub fn try_file_size(path: &Path) -> Result<u64, DedupError> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| DedupError::Stat {
            path: path.to_path_buf(),
            source,
        })
}

/// Size of a file in bytes, or `UNKNOWN_SIZE` if it cannot be read
pub fn file_size(path: &Path) -> i64 {
    match try_file_size(path) {
        Ok(len) => i64::try_from(len).unwrap_or(i64::MAX),
        Err(e) => {
            tracing::warn!("{}", e);
            UNKNOWN_SIZE
        }
    }
}

/// Creation time of a file, or `CreatedAt::Unknown` if it cannot be read
pub fn creation_time(path: &Path) -> CreatedAt {
    match std::fs::metadata(path) {
        Ok(meta) => created_from(&meta),
        Err(source) => {
            tracing::warn!(
                "{}",
                DedupError::Stat {
                    path: path.to_path_buf(),
                    source,
                }
            );
            CreatedAt::Unknown
        }
    }
}

/// Birth time when the filesystem records one, otherwise inode change time
pub fn created_from(meta: &Metadata) -> CreatedAt {
    if let Ok(time) = meta.created() {
        return CreatedAt::Known(time);
    }
    change_time(meta).map_or(CreatedAt::Unknown, CreatedAt::Known)
}

#[cfg(unix)]
fn change_time(meta: &Metadata) -> Option<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    use std::time::Duration;

    let secs = u64::try_from(meta.ctime()).ok()?;
    let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
    SystemTime::UNIX_EPOCH.checked_add(Duration::new(secs, nanos))
}

#[cfg(not(unix))]
fn change_time(_meta: &Metadata) -> Option<SystemTime> {
    None
}
