use std::fmt;

use super::grouper::{FileRecord, FingerprintGroup};

/// Rule for picking which member of a duplicate group is the original
///
/// `find` reports the earliest created file as original. The in-place
/// deletion modes keep whichever file the walk reached first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// Earliest creation time; ties go to the first file in scan order
    EarliestCreated,
    /// First file in scan order
    FirstSeen,
}

impl fmt::Display for ResolveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveStrategy::EarliestCreated => write!(f, "earliest created"),
            ResolveStrategy::FirstSeen => write!(f, "first seen"),
        }
    }
}

/// Original/duplicate split of one group
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub fingerprint: &'a str,
    pub original: &'a FileRecord,
    /// Remaining members in their original relative order
    pub duplicates: Vec<&'a FileRecord>,
}

/// Resolve a group into one original and its duplicates
///
/// Returns `None` for a group with fewer than two members.
pub fn resolve_group(group: &FingerprintGroup, strategy: ResolveStrategy) -> Option<Resolution<'_>> {
    if !group.is_duplicate_set() {
        return None;
    }

    let keep_idx = match strategy {
        // min_by_key returns the first of equal minima, so ties go to scan order
        ResolveStrategy::EarliestCreated => group
            .members
            .iter()
            .enumerate()
            .min_by_key(|(_, m)| (m.created_at, m.seq))
            .map(|(i, _)| i)?,
        ResolveStrategy::FirstSeen => group
            .members
            .iter()
            .enumerate()
            .min_by_key(|(_, m)| m.seq)
            .map(|(i, _)| i)?,
    };

    let duplicates = group
        .members
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != keep_idx)
        .map(|(_, m)| m)
        .collect();

    Some(Resolution {
        fingerprint: &group.fingerprint,
        original: &group.members[keep_idx],
        duplicates,
    })
}

/// Resolve every duplicate set in the given order
pub fn resolve_all<'a>(
    groups: impl IntoIterator<Item = &'a FingerprintGroup>,
    strategy: ResolveStrategy,
) -> Vec<Resolution<'a>> {
    groups
        .into_iter()
        .filter_map(|g| resolve_group(g, strategy))
        .collect()
}
