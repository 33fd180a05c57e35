use colored::*;

use crate::cleaner::{CleanReport, FindReport};
use crate::common::format::{self, format_count, format_path, format_size};

// ─── find ─────────────────────────────────────────────────────────────────────

pub fn print_find_results(report: &FindReport, detailed: bool) {
    println!();
    println!("  {} hfrdup Duplicate Scan", "👯");
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  Scanned {} in {}",
        format_count(report.files_scanned).cyan(),
        format::format_duration(report.duration_secs).cyan()
    );
    println!("{}", "─".repeat(60).dimmed());
    println!();

    if report.groups.is_empty() {
        println!("  {} No duplicates found!", "✨");
    } else {
        println!(
            "  {} {} ({} groups)",
            "●".red(),
            "Exact Duplicates".red().bold(),
            report.groups.len(),
        );
        println!();

        for (i, group) in report.groups.iter().enumerate() {
            println!(
                "    Group {} — {} files  {}",
                (i + 1).to_string().bold(),
                group.duplicates.len() + 1,
                group.fingerprint.dimmed(),
            );

            if detailed {
                println!(
                    "      {} {}  {}",
                    "keep →".dimmed(),
                    format_path(&group.original).green(),
                    format::format_created(&group.original_created).dimmed()
                );
                for dup in &group.duplicates {
                    println!("      {} {}", "  dup →".dimmed(), format_path(dup).dimmed());
                }
                println!();
            }
        }

        if !detailed {
            println!();
            println!("      Run with {} to see file paths", "--detailed".cyan());
        }
    }

    println!();
    print_errors(&report.errors);
    println!(
        "  Duplicate file list saved to {}",
        format_path(&report.output).cyan()
    );
    println!(
        "  Total duplicate files found: {}",
        report.total_duplicates.to_string().bold()
    );
    println!();
}

pub fn print_find_json(report: &FindReport) {
    match serde_json::to_string_pretty(report) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error serializing: {}", e),
    }
}

pub fn print_find_quiet(report: &FindReport) {
    println!("{}", report.total_duplicates);
}

// ─── deletion modes ───────────────────────────────────────────────────────────

pub fn print_clean_report(report: &CleanReport) {
    let verb = if report.dry_run { "Would delete" } else { "Deleted" };

    println!();
    if report.dry_run {
        println!("  {} {} (dry run)", "🔍", report.mode.to_string().bold());
    } else {
        println!("  {} {}", "🧹", report.mode.to_string().bold());
    }
    println!("{}", "─".repeat(60).dimmed());

    for path in &report.deleted {
        println!("  {}: {}", verb.dimmed(), format_path(path));
    }
    if !report.deleted.is_empty() {
        println!("{}", "─".repeat(60).dimmed());
    }

    println!(
        "  {} {} from {} groups, {} {} in {}",
        verb,
        format_count(report.deleted.len()).cyan(),
        report.duplicate_groups,
        format_size(report.bytes_freed).green(),
        if report.dry_run { "reclaimable" } else { "freed" },
        format::format_duration(report.duration_secs),
    );
    println!();
    print_errors(&report.errors);
}

pub fn print_clean_json(report: &CleanReport) {
    match serde_json::to_string_pretty(report) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error serializing: {}", e),
    }
}

pub fn print_clean_quiet(report: &CleanReport) {
    println!(
        "{}  {}  {}",
        report.deleted.len(),
        format_size(report.bytes_freed),
        report.errors.len()
    );
}

fn print_errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    println!(
        "  {} {} error(s):",
        "⚠".yellow(),
        errors.len().to_string().yellow()
    );
    for e in errors {
        println!("    {}", e.dimmed());
    }
    println!();
}
