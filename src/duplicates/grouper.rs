use std::collections::HashMap;
use std::path::PathBuf;

use super::hasher;
use super::metadata::{self, CreatedAt};
use crate::common::errors::DedupError;
use crate::common::{format, progress};

/// One scanned file with its fingerprint
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Position in scan order
    pub seq: usize,
    pub path: PathBuf,
    /// Size in bytes, or -1 if unreadable
    pub size: i64,
    pub fingerprint: String,
    pub created_at: CreatedAt,
}

impl FileRecord {
    /// Build a record, reading size and creation time from disk
    pub fn read(seq: usize, path: PathBuf, fingerprint: String) -> Self {
        let (size, created_at) = match std::fs::metadata(&path) {
            Ok(meta) => (
                i64::try_from(meta.len()).unwrap_or(i64::MAX),
                metadata::created_from(&meta),
            ),
            Err(source) => {
                tracing::warn!(
                    "{}",
                    DedupError::Stat {
                        path: path.clone(),
                        source,
                    }
                );
                (metadata::UNKNOWN_SIZE, CreatedAt::Unknown)
            }
        };

        Self {
            seq,
            path,
            size,
            fingerprint,
            created_at,
        }
    }
}

/// All scanned files sharing one fingerprint, in first-seen order
#[derive(Debug, Clone)]
pub struct FingerprintGroup {
    pub fingerprint: String,
    pub members: Vec<FileRecord>,
}

impl FingerprintGroup {
    /// A group of one is not a duplicate set
    pub fn is_duplicate_set(&self) -> bool {
        self.members.len() > 1
    }
}

/// Fingerprint → group table owned by a single grouping pass
#[derive(Debug, Default)]
pub struct DuplicateGroups {
    groups: Vec<FingerprintGroup>,
    index: HashMap<String, usize>,
    /// Group indices in the order each gained its second member
    discovered: Vec<usize>,
}

impl DuplicateGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build groups from records already in scan order
    pub fn from_records(records: impl IntoIterator<Item = FileRecord>) -> Self {
        let mut groups = Self::new();
        for record in records {
            groups.insert(record);
        }
        groups
    }

    /// Add a record to the group for its fingerprint
    pub fn insert(&mut self, record: FileRecord) {
        match self.index.get(&record.fingerprint) {
            Some(&idx) => {
                let group = &mut self.groups[idx];
                group.members.push(record);
                if group.members.len() == 2 {
                    self.discovered.push(idx);
                }
            }
            None => {
                let idx = self.groups.len();
                self.index.insert(record.fingerprint.clone(), idx);
                self.groups.push(FingerprintGroup {
                    fingerprint: record.fingerprint.clone(),
                    members: vec![record],
                });
            }
        }
    }

    /// Groups with two or more members, in discovery order
    pub fn duplicate_sets(&self) -> impl Iterator<Item = &FingerprintGroup> {
        self.discovered.iter().map(move |&idx| &self.groups[idx])
    }

    /// Number of files that are not the single kept member of their group
    pub fn total_duplicates(&self) -> usize {
        self.duplicate_sets().map(|g| g.members.len() - 1).sum()
    }
}

/// Fingerprint files and turn them into records, in scan order
///
/// Files that cannot be hashed are left out and returned as errors.
pub fn hash_records(
    paths: Vec<PathBuf>,
    threads: usize,
    show_progress: bool,
) -> (Vec<FileRecord>, Vec<DedupError>) {
    let pb = progress::make_progress(show_progress, paths.len() as u64, "Hashing...");
    let fingerprinted = hasher::fingerprint_all(paths, threads, pb.as_ref());

    let mut records = Vec::with_capacity(fingerprinted.len());
    let mut errors = Vec::new();

    for (seq, (path, result)) in fingerprinted.into_iter().enumerate() {
        match result {
            Ok(fingerprint) => {
                tracing::debug!("{} {}", fingerprint, path.display());
                records.push(FileRecord::read(seq, path, fingerprint));
            }
            Err(e) => {
                tracing::warn!("{}", e);
                errors.push(e);
            }
        }
    }

    progress::finish_progress(pb, &format!("Hashed {}", format::format_count(records.len())));
    (records, errors)
}

/// Group scanned paths by fingerprint
pub fn group(
    paths: Vec<PathBuf>,
    threads: usize,
    show_progress: bool,
) -> (DuplicateGroups, Vec<DedupError>) {
    let (records, errors) = hash_records(paths, threads, show_progress);
    (DuplicateGroups::from_records(records), errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq: usize, path: &str, fingerprint: &str) -> FileRecord {
        FileRecord {
            seq,
            path: PathBuf::from(path),
            size: 1,
            fingerprint: fingerprint.to_string(),
            created_at: CreatedAt::Unknown,
        }
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let groups = DuplicateGroups::from_records(vec![
            record(0, "/t/a", "h1"),
            record(1, "/t/b", "h2"),
            record(2, "/t/c", "h1"),
            record(3, "/t/d", "h1"),
        ]);

        let sets: Vec<_> = groups.duplicate_sets().collect();
        assert_eq!(sets.len(), 1, "h2 has one member and is not a duplicate set");
        assert_eq!(sets[0].fingerprint, "h1");
        let paths: Vec<_> = sets[0].members.iter().map(|m| m.path.to_str().unwrap()).collect();
        assert_eq!(paths, vec!["/t/a", "/t/c", "/t/d"]);
        assert_eq!(groups.total_duplicates(), 2);
    }

    #[test]
    fn test_discovery_order_follows_second_member() {
        let groups = DuplicateGroups::from_records(vec![
            record(0, "/t/a", "h1"),
            record(1, "/t/b", "h2"),
            record(2, "/t/c", "h2"),
            record(3, "/t/d", "h1"),
        ]);

        let order: Vec<_> = groups.duplicate_sets().map(|g| g.fingerprint.as_str()).collect();
        assert_eq!(order, vec!["h2", "h1"]);
    }

    #[test]
    fn test_singletons_are_not_duplicate_sets() {
        let groups = DuplicateGroups::from_records(vec![record(0, "/t/a", "h1")]);
        assert_eq!(groups.duplicate_sets().count(), 0);
        assert_eq!(groups.total_duplicates(), 0);
    }
}
