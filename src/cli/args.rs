use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

pub use crate::common::config::OutputFormat;

/// hfrdup: find and remove duplicate files by content hash
#[derive(Parser, Debug)]
#[command(
    name = "hfrdup",
    version,
    about = "Find and remove duplicate files by content hash",
    long_about = "hfrdup fingerprints files with SHA-256 and groups identical content.\n\
                   Report duplicates to a log, then delete from the log, per folder,\n\
                   across a tree, or against a reference tree.",
    after_help = "EXAMPLES:\n  \
        hfrdup find ~/Photos -o dups.txt                 Write duplicate groups to dups.txt\n  \
        hfrdup find ~/Photos -o dups.txt -r '\\.jpe?g$'   Only consider JPEG names\n  \
        hfrdup find . -o dups.txt --min-size 1048576     Skip files under 1 MiB\n  \
        hfrdup del dups.txt                              Delete every DUPLICATE in the log\n  \
        hfrdup del_folder ~/Downloads --dry-run          Preview repeats within each folder\n  \
        hfrdup del_global ~/Archive                      Keep one copy per content across the tree\n  \
        hfrdup del_ref -s ~/Backup -t ~/Inbox            Drop Inbox files already in Backup"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (defaults to the config file setting)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file to use instead of ~/.hfrdup/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output (-v info, -vv debug)
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode, errors only
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find duplicates and write them to a log file
    #[command(name = "find")]
    Find {
        /// Directory to scan
        path: PathBuf,

        /// Log file to write (required)
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Regex searched against file names
        #[arg(long, short = 'r', value_name = "REGEX")]
        regex: Option<String>,

        /// Minimum file size in bytes
        #[arg(long, value_name = "N")]
        min_size: Option<u64>,

        /// Maximum file size in bytes
        #[arg(long, value_name = "N")]
        max_size: Option<u64>,

        /// Show individual files in each group
        #[arg(long)]
        detailed: bool,
    },

    /// Delete files marked DUPLICATE in a log written by `find`
    #[command(name = "del")]
    Del {
        /// Log file to read
        log: PathBuf,

        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete repeated files within each directory
    #[command(name = "del_folder")]
    DelFolder {
        /// Directory to clean
        path: PathBuf,

        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete repeated files across the whole tree
    #[command(name = "del_global")]
    DelGlobal {
        /// Directory to clean
        path: PathBuf,

        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete target files whose content exists in the source tree
    #[command(name = "del_ref")]
    DelRef {
        /// Reference tree, never modified (required)
        #[arg(long, short = 's', value_name = "DIR")]
        source: Option<PathBuf>,

        /// Tree to delete from (required)
        #[arg(long, short = 't', value_name = "DIR")]
        target: Option<PathBuf>,

        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },
}
