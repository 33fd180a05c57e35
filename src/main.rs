use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::Path;

use hfrdup::cleaner::{self, CleanReport, EngineOptions};
use hfrdup::cli::args::{Cli, Commands, OutputFormat};
use hfrdup::cli::output;
use hfrdup::common::config::Config;
use hfrdup::common::format;
use hfrdup::scanner::ScanFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }?;

    let _log_guard = hfrdup::logging::init(cli.verbose, cli.quiet, config.log_to_file);

    let out_format = cli.format.unwrap_or(config.output_format);
    let mut opts = EngineOptions::from_config(&config);
    opts.show_progress = opts.show_progress && !cli.quiet && out_format == OutputFormat::Human;

    match cli.command {
        Commands::Find {
            ref path,
            output: ref log_out,
            ref regex,
            min_size,
            max_size,
            detailed,
        } => cmd_find(
            &cli,
            out_format,
            &opts,
            path,
            log_out.as_deref(),
            regex.as_deref(),
            min_size,
            max_size,
            detailed,
        ),

        Commands::Del { ref log, dry_run } => {
            opts.dry_run = dry_run;
            let report = cleaner::delete_from_log(log, &opts)
                .with_context(|| format!("del failed for log {}", log.display()))?;
            print_clean(out_format, &report);
            Ok(())
        }

        Commands::DelFolder { ref path, dry_run } => {
            opts.dry_run = dry_run;
            announce(&cli, out_format, "Removing repeats within each folder of", path);
            let report = cleaner::delete_per_folder(path, &opts)?;
            print_clean(out_format, &report);
            Ok(())
        }

        Commands::DelGlobal { ref path, dry_run } => {
            opts.dry_run = dry_run;
            announce(&cli, out_format, "Removing repeats across", path);
            let report = cleaner::delete_global(path, &opts)?;
            print_clean(out_format, &report);
            Ok(())
        }

        Commands::DelRef {
            ref source,
            ref target,
            dry_run,
        } => {
            opts.dry_run = dry_run;
            let report =
                cleaner::delete_by_reference(source.as_deref(), target.as_deref(), &opts)?;
            print_clean(out_format, &report);
            Ok(())
        }
    }
}

// ─── Find ─────────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn cmd_find(
    cli: &Cli,
    out_format: OutputFormat,
    opts: &EngineOptions,
    root: &Path,
    log_out: Option<&Path>,
    regex: Option<&str>,
    min_size: Option<u64>,
    max_size: Option<u64>,
    detailed: bool,
) -> Result<()> {
    // A missing -o is reported ahead of a bad pattern
    let log_out = cleaner::find_output(log_out)?;
    let filter = ScanFilter::new(regex, min_size, max_size)?;

    announce(cli, out_format, "Scanning for duplicates in", root);
    let report = cleaner::find(root, Some(log_out), &filter, opts)?;

    match out_format {
        OutputFormat::Human => output::print_find_results(&report, detailed),
        OutputFormat::Json => output::print_find_json(&report),
        OutputFormat::Quiet => output::print_find_quiet(&report),
    }

    Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn announce(cli: &Cli, out_format: OutputFormat, what: &str, root: &Path) {
    if cli.quiet || out_format != OutputFormat::Human {
        return;
    }
    println!();
    println!("  {} {} {}", "🔍", what, format::format_path(root).cyan());
}

fn print_clean(out_format: OutputFormat, report: &CleanReport) {
    match out_format {
        OutputFormat::Human => output::print_clean_report(report),
        OutputFormat::Json => output::print_clean_json(report),
        OutputFormat::Quiet => output::print_clean_quiet(report),
    }
}
