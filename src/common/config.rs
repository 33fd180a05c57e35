use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::scanner::walker::ScanOptions;

/// Global hfrdup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hashing threads (0 = one per core, 1 = sequential)
    #[serde(default)]
    pub hash_threads: usize,

    /// Follow symbolic links while walking
    #[serde(default)]
    pub follow_links: bool,

    /// Sort directory entries by name instead of filesystem order
    #[serde(default)]
    pub sort_by_name: bool,

    /// Paths to exclude from scanning
    #[serde(default)]
    pub exclude_paths: Vec<String>,

    /// Show progress spinners in human output
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,

    /// Also write logs to ~/.hfrdup/logs
    #[serde(default)]
    pub log_to_file: bool,

    /// Output format preference
    #[serde(default)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Quiet,
}

fn default_show_progress() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hash_threads: 0,
            follow_links: false,
            sort_by_name: false,
            exclude_paths: Vec::new(),
            show_progress: default_show_progress(),
            log_to_file: false,
            output_format: OutputFormat::Human,
        }
    }
}

impl Config {
    /// Get the hfrdup data directory (~/.hfrdup)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".hfrdup")
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Get the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::data_dir().join("logs")
    }

    /// Load config from the default location, or defaults if it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a specific file, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Self::parse(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Parse config from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Walk options derived from this config
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            follow_links: self.follow_links,
            sort_by_name: self.sort_by_name,
            exclude: self.exclude_paths.clone(),
        }
    }
}
