use regex::Regex;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::common::errors::DedupError;
use crate::duplicates::metadata;

/// Which files a scan yields
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    /// Regex searched (not full-matched) against each file name
    pub name_pattern: Option<Regex>,
    /// Smallest size to yield, inclusive
    pub min_size: Option<u64>,
    /// Largest size to yield, inclusive
    pub max_size: Option<u64>,
}

impl ScanFilter {
    /// Build a filter, compiling the name pattern if one is given
    pub fn new(
        pattern: Option<&str>,
        min_size: Option<u64>,
        max_size: Option<u64>,
    ) -> Result<Self, DedupError> {
        let name_pattern = pattern
            .map(|p| {
                Regex::new(p).map_err(|source| DedupError::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .transpose()?;

        Ok(Self {
            name_pattern,
            min_size,
            max_size,
        })
    }

    /// Whether this filter needs the file size
    pub fn has_size_bounds(&self) -> bool {
        self.min_size.is_some() || self.max_size.is_some()
    }

    /// Check a file name against the pattern
    pub fn matches_name(&self, name: &str) -> bool {
        self.name_pattern
            .as_ref()
            .map_or(true, |re| re.is_match(name))
    }

    /// Check a size (possibly `UNKNOWN_SIZE`) against the bounds
    pub fn size_in_bounds(&self, size: i64) -> bool {
        let above_min = self
            .min_size
            .map_or(true, |min| size >= 0 && size as u64 >= min);
        let below_max = self.max_size.map_or(true, |max| size < 0 || size as u64 <= max);
        above_min && below_max
    }
}

/// How the tree is walked
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Follow symbolic links into directories
    pub follow_links: bool,
    /// Order entries by name instead of filesystem order
    pub sort_by_name: bool,
    /// Skip any path containing one of these substrings
    pub exclude: Vec<String>,
}

impl ScanOptions {
    /// Check if a path should be excluded
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.display().to_string();
        self.exclude.iter().any(|p| path_str.contains(p.as_str()))
    }
}

/// Lazily walk `root`, yielding every regular file that passes `filter`
///
/// Within a directory, files come before the contents of subdirectories.
/// Entries otherwise keep filesystem order unless `sort_by_name` is set,
/// so the sequence is stable for a given tree on a given platform.
/// Symlinks to files are skipped unless `follow_links` is set.
pub fn scan<'a>(
    root: &Path,
    filter: &'a ScanFilter,
    options: &ScanOptions,
) -> impl Iterator<Item = PathBuf> + 'a {
    let sort_by_name = options.sort_by_name;
    let prune = options.clone();

    WalkDir::new(root)
        .follow_links(options.follow_links)
        .sort_by(move |a, b| entry_order(a, b, sort_by_name))
        .into_iter()
        .filter_entry(move |e| e.depth() == 0 || !prune.is_excluded(e.path()))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(move |e| accepts(filter, e))
        .map(DirEntry::into_path)
}

/// Files first, then directories; ties keep walk order or sort by name
fn entry_order(a: &DirEntry, b: &DirEntry, sort_by_name: bool) -> Ordering {
    let by_kind = a.file_type().is_dir().cmp(&b.file_type().is_dir());
    if sort_by_name {
        by_kind.then_with(|| a.file_name().cmp(b.file_name()))
    } else {
        by_kind
    }
}

fn accepts(filter: &ScanFilter, entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if !filter.matches_name(&name) {
        tracing::trace!("Name filter skipped {}", entry.path().display());
        return false;
    }

    if filter.has_size_bounds() {
        let size = metadata::file_size(entry.path());
        if !filter.size_in_bounds(size) {
            tracing::trace!("Size filter skipped {} ({} bytes)", entry.path().display(), size);
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_bounds_inclusive() {
        let filter = ScanFilter::new(None, Some(10), Some(20)).unwrap();
        assert!(!filter.size_in_bounds(9));
        assert!(filter.size_in_bounds(10));
        assert!(filter.size_in_bounds(20));
        assert!(!filter.size_in_bounds(21));
    }

    #[test]
    fn test_unknown_size_fails_min_bound() {
        let min_only = ScanFilter::new(None, Some(1), None).unwrap();
        assert!(!min_only.size_in_bounds(metadata::UNKNOWN_SIZE));

        let max_only = ScanFilter::new(None, None, Some(100)).unwrap();
        assert!(max_only.size_in_bounds(metadata::UNKNOWN_SIZE));
    }

    #[test]
    fn test_name_pattern_is_search() {
        let filter = ScanFilter::new(Some(r"\.jpe?g$"), None, None).unwrap();
        assert!(filter.matches_name("holiday.jpg"));
        assert!(filter.matches_name("IMG_0001.jpeg"));
        assert!(!filter.matches_name("notes.txt"));

        let filter = ScanFilter::new(Some("report"), None, None).unwrap();
        assert!(filter.matches_name("2024-report-final.pdf"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = ScanFilter::new(Some("(unclosed"), None, None).unwrap_err();
        assert!(matches!(err, DedupError::InvalidPattern { .. }));
    }

    #[test]
    fn test_exclusion() {
        let options = ScanOptions {
            exclude: vec!["node_modules".to_string()],
            ..Default::default()
        };
        assert!(options.is_excluded(Path::new("/w/node_modules/x.js")));
        assert!(!options.is_excluded(Path::new("/w/src/x.js")));
    }
}
