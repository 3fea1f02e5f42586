//! List flow - Table of cached fetch entries plus a summary
//!
//! Only `fetch` entries are listed by default; the summary always covers every
//! entry found.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::cache::scanner::get_cache_entries;
use crate::core::model::{CacheEntry, CacheType, ScanReport};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};

/// Entries to show in the table, newest first (ties keep scan order)
pub fn select_rows(report: &ScanReport, all_types: bool) -> Vec<&CacheEntry> {
    let mut rows: Vec<&CacheEntry> = report
        .entries
        .iter()
        .filter(|e| all_types || e.cache_type == CacheType::Fetch)
        .collect();
    rows.sort_by(|a, b| b.modified.cmp(&a.modified));
    rows
}

/// Run the list command
pub fn run_list(build_dir: &Path, all_types: bool, config: RenderConfig) -> Result<()> {
    let renderer = Renderer::with_config(config);

    if renderer.format() == OutputFormat::Json {
        let report = get_cache_entries(build_dir);
        report.log_warnings();
        println!("{}", renderer.render_json(&report)?);
        return Ok(());
    }

    println!("{}", "Scanning Next.js cache...\n".blue());

    let report = get_cache_entries(build_dir);
    report.log_warnings();

    let rows = select_rows(&report, all_types);
    if rows.is_empty() {
        println!("{}", "No cache entries found.".yellow());
        println!(
            "{}",
            "Cache directory may be empty or not yet created.".dimmed()
        );
        return Ok(());
    }

    println!("{}", renderer.render_table(&rows));
    println!();
    println!("{}", renderer.render_summary(&report.stats));

    Ok(())
}
