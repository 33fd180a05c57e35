use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::manifest::{self, DuplicateLogEntry};
use super::purger::{self, PurgeReport};
use crate::common::config::Config;
use crate::common::errors::DedupError;
use crate::common::format;
use crate::duplicates::{self, DuplicateGroups, FileRecord, ResolveStrategy};
use crate::scanner::{self, ScanFilter, ScanOptions};

/// The five resolution modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[serde(rename = "find")]
    Find,
    #[serde(rename = "del")]
    DeleteFromLog,
    #[serde(rename = "del_folder")]
    DeletePerFolder,
    #[serde(rename = "del_global")]
    DeleteGlobal,
    #[serde(rename = "del_ref")]
    DeleteByReference,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Find => "find",
            Mode::DeleteFromLog => "del",
            Mode::DeletePerFolder => "del_folder",
            Mode::DeleteGlobal => "del_global",
            Mode::DeleteByReference => "del_ref",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Knobs shared by every mode
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub scan: ScanOptions,
    /// Hashing threads (0 = rayon default, 1 = sequential)
    pub hash_threads: usize,
    pub show_progress: bool,
    /// Decide everything, delete nothing
    pub dry_run: bool,
}

impl EngineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            scan: config.scan_options(),
            hash_threads: config.hash_threads,
            show_progress: config.show_progress,
            dry_run: false,
        }
    }
}

/// Result of `find`
#[derive(Debug, Clone, Serialize)]
pub struct FindReport {
    pub root: PathBuf,
    pub output: PathBuf,
    pub files_scanned: usize,
    /// Entries as written to the log, in discovery order
    pub groups: Vec<DuplicateLogEntry>,
    pub total_duplicates: usize,
    pub duration_secs: f64,
    pub errors: Vec<String>,
}

/// Result of any deleting mode
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    pub mode: Mode,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub duplicate_groups: usize,
    /// Files removed (or that would be), in deletion order
    pub deleted: Vec<PathBuf>,
    pub bytes_freed: u64,
    pub duration_secs: f64,
    pub errors: Vec<String>,
}

impl CleanReport {
    fn new(mode: Mode, dry_run: bool) -> Self {
        Self {
            mode,
            dry_run,
            files_scanned: 0,
            duplicate_groups: 0,
            deleted: Vec::new(),
            bytes_freed: 0,
            duration_secs: 0.0,
            errors: Vec::new(),
        }
    }

    fn absorb(&mut self, purge: PurgeReport) {
        self.deleted.extend(purge.deleted);
        self.bytes_freed += purge.bytes_freed;
        self.errors.extend(purge.errors);
    }
}

fn error_strings(errors: Vec<DedupError>) -> Vec<String> {
    errors.into_iter().map(|e| e.to_string()).collect()
}

fn require<'a>(
    value: Option<&'a Path>,
    mode: Mode,
    flag: &'static str,
) -> Result<&'a Path, DedupError> {
    value.ok_or(DedupError::MissingArgument {
        mode: mode.name(),
        flag,
    })
}

/// Duplicates under the first-seen rule, in scan order
fn first_seen_duplicates<'a, I>(tables: I) -> Vec<&'a FileRecord>
where
    I: IntoIterator<Item = &'a DuplicateGroups>,
{
    let mut doomed: Vec<&FileRecord> = tables
        .into_iter()
        .flat_map(|groups| {
            duplicates::resolve_all(groups.duplicate_sets(), ResolveStrategy::FirstSeen)
        })
        .flat_map(|resolution| resolution.duplicates)
        .collect();
    doomed.sort_by_key(|r| r.seq);
    doomed
}

// ─── find ─────────────────────────────────────────────────────────────────────

/// Resolve `find`'s log path, failing when it was not given
pub fn find_output(output: Option<&Path>) -> Result<&Path, DedupError> {
    require(output, Mode::Find, "-o/--output")
}

/// Scan `root`, group duplicates and write the log to `output`
///
/// The original of each group is its earliest created member. Nothing is
/// deleted. Fails with `MissingArgument` before scanning if `output` is absent.
/// Files whose path cannot be written to the log intact are left out of
/// every group and reported as errors.
pub fn find(
    root: &Path,
    output: Option<&Path>,
    filter: &ScanFilter,
    opts: &EngineOptions,
) -> Result<FindReport, DedupError> {
    let output = find_output(output)?;
    scanner::ensure_dir(root)?;
    let start = Instant::now();

    let paths = scanner::collect_files(root, filter, &opts.scan, opts.show_progress);
    let files_scanned = paths.len();
    let (records, mut errors) =
        duplicates::hash_records(paths, opts.hash_threads, opts.show_progress);

    let (records, unloggable): (Vec<FileRecord>, Vec<FileRecord>) = records
        .into_iter()
        .partition(|r| manifest::is_loggable(&r.path));
    for record in unloggable {
        let err = DedupError::UnloggablePath { path: record.path };
        tracing::warn!("{}", err);
        errors.push(err);
    }
    let groups = DuplicateGroups::from_records(records);

    let strategy = ResolveStrategy::EarliestCreated;
    let resolutions = duplicates::resolve_all(groups.duplicate_sets(), strategy);
    for r in &resolutions {
        tracing::debug!(
            "{}: original {} by {} ({}), {} duplicate(s)",
            r.fingerprint,
            r.original.path.display(),
            strategy,
            format::format_created(&r.original.created_at),
            r.duplicates.len()
        );
    }
    let entries: Vec<DuplicateLogEntry> = resolutions
        .iter()
        .map(DuplicateLogEntry::from_resolution)
        .collect();

    manifest::write_log(output, &entries)?;

    let total_duplicates = groups.total_duplicates();
    tracing::info!(
        "find: {} files, {} groups, {} duplicates -> {}",
        files_scanned,
        entries.len(),
        total_duplicates,
        output.display()
    );

    Ok(FindReport {
        root: root.to_path_buf(),
        output: output.to_path_buf(),
        files_scanned,
        groups: entries,
        total_duplicates,
        duration_secs: start.elapsed().as_secs_f64(),
        errors: error_strings(errors),
    })
}

// ─── del ──────────────────────────────────────────────────────────────────────

/// Delete every path on a `DUPLICATE` line of a log written by `find`
///
/// Fingerprints are not re-checked; the log is trusted.
pub fn delete_from_log(log_path: &Path, opts: &EngineOptions) -> Result<CleanReport, DedupError> {
    let start = Instant::now();
    let text = manifest::read_log(log_path)?;
    let paths = manifest::duplicate_paths(&text);

    let mut report = CleanReport::new(Mode::DeleteFromLog, opts.dry_run);
    report.files_scanned = paths.len();
    report.duplicate_groups = manifest::parse_log(&text).len();
    report.absorb(purger::purge_files(paths, opts.dry_run));
    report.duration_secs = start.elapsed().as_secs_f64();

    tracing::info!(
        "del: {} of {} listed duplicates removed",
        report.deleted.len(),
        report.files_scanned
    );
    Ok(report)
}

// ─── del_folder ───────────────────────────────────────────────────────────────

/// Within each directory, keep the first file seen per fingerprint and
/// delete later ones from that same directory
///
/// Identical files in different directories are left alone.
pub fn delete_per_folder(root: &Path, opts: &EngineOptions) -> Result<CleanReport, DedupError> {
    scanner::ensure_dir(root)?;
    let start = Instant::now();
    let mut report = CleanReport::new(Mode::DeletePerFolder, opts.dry_run);

    let paths = scanner::collect_files(root, &ScanFilter::default(), &opts.scan, opts.show_progress);
    report.files_scanned = paths.len();
    let (records, hash_errors) =
        duplicates::hash_records(paths, opts.hash_threads, opts.show_progress);
    report.errors.extend(error_strings(hash_errors));

    let mut folders: Vec<DuplicateGroups> = Vec::new();
    let mut folder_index: HashMap<PathBuf, usize> = HashMap::new();
    for record in records {
        let dir = record.path.parent().map(Path::to_path_buf).unwrap_or_default();
        let idx = *folder_index.entry(dir).or_insert_with(|| {
            folders.push(DuplicateGroups::new());
            folders.len() - 1
        });
        folders[idx].insert(record);
    }

    report.duplicate_groups = folders.iter().map(|f| f.duplicate_sets().count()).sum();
    let doomed: Vec<PathBuf> = first_seen_duplicates(&folders)
        .into_iter()
        .map(|r| r.path.clone())
        .collect();
    report.absorb(purger::purge_files(doomed, opts.dry_run));
    report.duration_secs = start.elapsed().as_secs_f64();

    tracing::info!(
        "del_folder: {} files in {} folders, {} removed",
        report.files_scanned,
        folders.len(),
        report.deleted.len()
    );
    Ok(report)
}

// ─── del_global ───────────────────────────────────────────────────────────────

/// Keep the first file seen per fingerprint across the whole tree and
/// delete every later one
///
/// Creation time plays no part here, unlike `find`.
pub fn delete_global(root: &Path, opts: &EngineOptions) -> Result<CleanReport, DedupError> {
    scanner::ensure_dir(root)?;
    let start = Instant::now();
    let mut report = CleanReport::new(Mode::DeleteGlobal, opts.dry_run);

    let paths = scanner::collect_files(root, &ScanFilter::default(), &opts.scan, opts.show_progress);
    report.files_scanned = paths.len();
    let (groups, hash_errors) = duplicates::group(paths, opts.hash_threads, opts.show_progress);
    report.errors.extend(error_strings(hash_errors));

    report.duplicate_groups = groups.duplicate_sets().count();
    let doomed: Vec<PathBuf> = first_seen_duplicates([&groups])
        .into_iter()
        .map(|r| r.path.clone())
        .collect();
    report.absorb(purger::purge_files(doomed, opts.dry_run));
    report.duration_secs = start.elapsed().as_secs_f64();

    tracing::info!(
        "del_global: {} files, {} groups, {} removed",
        report.files_scanned,
        report.duplicate_groups,
        report.deleted.len()
    );
    Ok(report)
}

// ─── del_ref ──────────────────────────────────────────────────────────────────

/// Delete every file under `target` whose content matches any file under
/// `source`
///
/// The source tree is only read. Both trees are required, and they may not
/// contain one another.
pub fn delete_by_reference(
    source: Option<&Path>,
    target: Option<&Path>,
    opts: &EngineOptions,
) -> Result<CleanReport, DedupError> {
    let source = require(source, Mode::DeleteByReference, "-s/--source")?;
    let target = require(target, Mode::DeleteByReference, "-t/--target")?;
    scanner::ensure_dir(source)?;
    scanner::ensure_dir(target)?;
    ensure_disjoint(source, target)?;

    let start = Instant::now();
    let mut report = CleanReport::new(Mode::DeleteByReference, opts.dry_run);

    let everything = ScanFilter::default();

    let source_paths = scanner::collect_files(source, &everything, &opts.scan, opts.show_progress);
    let (source_records, source_errors) =
        duplicates::hash_records(source_paths, opts.hash_threads, opts.show_progress);
    report.errors.extend(error_strings(source_errors));
    let reference: HashSet<String> = source_records.into_iter().map(|r| r.fingerprint).collect();

    let target_paths = scanner::collect_files(target, &everything, &opts.scan, opts.show_progress);
    report.files_scanned = target_paths.len();
    let (target_records, target_errors) =
        duplicates::hash_records(target_paths, opts.hash_threads, opts.show_progress);
    report.errors.extend(error_strings(target_errors));

    let matched: Vec<FileRecord> = target_records
        .into_iter()
        .filter(|r| reference.contains(&r.fingerprint))
        .collect();
    report.duplicate_groups = matched
        .iter()
        .map(|r| r.fingerprint.as_str())
        .collect::<HashSet<_>>()
        .len();

    report.absorb(purger::purge_files(
        matched.into_iter().map(|r| r.path),
        opts.dry_run,
    ));
    report.duration_secs = start.elapsed().as_secs_f64();

    tracing::info!(
        "del_ref: {} reference fingerprints, {} target files, {} removed",
        reference.len(),
        report.files_scanned,
        report.deleted.len()
    );
    Ok(report)
}

fn ensure_disjoint(source: &Path, target: &Path) -> Result<(), DedupError> {
    let canonical = |p: &Path| {
        p.canonicalize().map_err(|e| DedupError::Io {
            path: p.to_path_buf(),
            source: e,
        })
    };
    let source_abs = canonical(source)?;
    let target_abs = canonical(target)?;

    if source_abs.starts_with(&target_abs) || target_abs.starts_with(&source_abs) {
        return Err(DedupError::OverlappingScopes {
            source_root: source.to_path_buf(),
            target_root: target.to_path_buf(),
        });
    }
    Ok(())
}
