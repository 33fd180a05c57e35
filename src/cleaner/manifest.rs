//! The duplicate log written by `find` and consumed by `del`.
//!
//! Plain UTF-8 text, one block per group, blocks separated by a blank line:
//!
//! ```text
//! <fingerprint-hex>
//! ORIGINAL <path>
//! DUPLICATE <path>
//! DUPLICATE <path>
//!
//! ```

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::common::errors::DedupError;
use crate::duplicates::{CreatedAt, Resolution};

pub const ORIGINAL_PREFIX: &str = "ORIGINAL ";
pub const DUPLICATE_PREFIX: &str = "DUPLICATE ";

/// One group's record in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateLogEntry {
    pub fingerprint: String,
    pub original: PathBuf,
    /// Not written to the log; `Unknown` for parsed entries
    pub original_created: CreatedAt,
    pub duplicates: Vec<PathBuf>,
}

impl DuplicateLogEntry {
    pub fn from_resolution(resolution: &Resolution<'_>) -> Self {
        Self {
            fingerprint: resolution.fingerprint.to_string(),
            original: resolution.original.path.clone(),
            original_created: resolution.original.created_at,
            duplicates: resolution
                .duplicates
                .iter()
                .map(|d| d.path.clone())
                .collect(),
        }
    }

    /// Write this entry as one log block, including the trailing blank line
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.fingerprint)?;
        writeln!(out, "{}{}", ORIGINAL_PREFIX, self.original.display())?;
        for dup in &self.duplicates {
            writeln!(out, "{}{}", DUPLICATE_PREFIX, dup.display())?;
        }
        writeln!(out)
    }
}

/// Whether `path` reads back unchanged from a log line
///
/// The log is split on line breaks and each path is trimmed, so a path must
/// be valid UTF-8, contain no `\n` or `\r`, and have no surrounding
/// whitespace.
pub fn is_loggable(path: &Path) -> bool {
    match path.to_str() {
        Some(s) => !s.is_empty() && !s.contains(['\n', '\r']) && s.trim() == s,
        None => false,
    }
}

/// Write all entries to `path`, replacing any existing file
pub fn write_log(path: &Path, entries: &[DuplicateLogEntry]) -> Result<(), DedupError> {
    let io_err = |source| DedupError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    for entry in entries {
        entry.write_to(&mut out).map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

/// Paths listed on `DUPLICATE ` lines, in file order
///
/// Every other line (fingerprints, `ORIGINAL`, blanks) is ignored.
pub fn duplicate_paths(text: &str) -> Vec<PathBuf> {
    text.lines()
        .filter_map(|line| line.strip_prefix(DUPLICATE_PREFIX))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Read a log file written by `find`
pub fn read_log(path: &Path) -> Result<String, DedupError> {
    std::fs::read_to_string(path).map_err(|source| DedupError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse whole entries back out of log text
///
/// Blocks without an `ORIGINAL` line are dropped.
pub fn parse_log(text: &str) -> Vec<DuplicateLogEntry> {
    let mut entries = Vec::new();
    let mut fingerprint: Option<String> = None;
    let mut original: Option<PathBuf> = None;
    let mut duplicates: Vec<PathBuf> = Vec::new();

    let mut flush = |fp: &mut Option<String>, orig: &mut Option<PathBuf>, dups: &mut Vec<PathBuf>| {
        if let (Some(fingerprint), Some(original)) = (fp.take(), orig.take()) {
            entries.push(DuplicateLogEntry {
                fingerprint,
                original,
                original_created: CreatedAt::Unknown,
                duplicates: std::mem::take(dups),
            });
        }
        dups.clear();
    };

    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut fingerprint, &mut original, &mut duplicates);
        } else if let Some(rest) = line.strip_prefix(ORIGINAL_PREFIX) {
            original = Some(PathBuf::from(rest.trim()));
        } else if let Some(rest) = line.strip_prefix(DUPLICATE_PREFIX) {
            duplicates.push(PathBuf::from(rest.trim()));
        } else {
            flush(&mut fingerprint, &mut original, &mut duplicates);
            fingerprint = Some(line.trim().to_string());
        }
    }
    flush(&mut fingerprint, &mut original, &mut duplicates);

    entries
}
