//! Logging setup for the `hfrdup` binary.
//!
//! The level comes from `RUST_LOG` when set, otherwise from the CLI flags:
//! `--quiet` shows errors only, the default shows warnings (every file that
//! could not be hashed or deleted), `-v` adds a line per deletion and `-vv`
//! adds a line per fingerprint. With `log_to_file` enabled in the config, the
//! same events are also appended to a daily file under `~/.hfrdup/logs`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::common::config::Config;

/// Filter directive for the given CLI flags
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "hfrdup=error";
    }
    match verbose {
        0 => "hfrdup=warn",
        1 => "hfrdup=info",
        _ => "hfrdup=debug",
    }
}

/// Install the global subscriber
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the whole run.
pub fn init(verbose: u8, quiet: bool, log_to_file: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let (file_layer, guard) = if log_to_file {
        let dir = Config::logs_dir();
        match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&dir, "hfrdup.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Could not create log directory {}: {}", dir.display(), e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    // A subscriber may already be installed (tests); keep the existing one
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}
