//! Revalidate flow - Interactive deletion of cache entries by tag or URL
//!
//! Both flows share the same shape:
//! scan -> (nothing found) | select -> (nothing selected) | confirm -> (declined) | delete.
//! Deletion is per-file; one failure never stops the rest.

use anyhow::Result;
use colored::Colorize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::backends::prompt::{Prompter, TerminalPrompter};
use crate::cache::scanner::get_cache_entries;
use crate::core::format::format_size;
use crate::core::model::CacheEntry;

const CONFIRM_PROMPT: &str = "Are you sure you want to delete these cache entries?";

/// Terminal state of a revalidation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevalidateOutcome {
    /// Nothing to choose from (no tags / no URLs in the cache)
    NothingFound,
    /// The user ticked nothing
    NoneSelected,
    /// The user declined the confirmation
    Cancelled,
    Completed(DeleteReport),
}

/// Tally of a deletion pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: usize,
    /// (relative path, error message) for every file that could not be removed
    pub failed: Vec<(String, String)>,
}

/// All entries carrying one tag
#[derive(Debug)]
pub struct TagGroup<'a> {
    pub tag: String,
    pub entries: Vec<&'a CacheEntry>,
}

impl TagGroup<'_> {
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

/// Bucket entries by tag, most populated tag first.
///
/// An entry with N tags lands in N buckets. Buckets with equal counts keep the
/// order in which their tag was first seen.
pub fn group_by_tag(entries: &[CacheEntry]) -> Vec<TagGroup<'_>> {
    let mut groups: Vec<TagGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        for tag in entry.tag_list() {
            let slot = *index.entry(tag.as_str()).or_insert_with(|| {
                groups.push(TagGroup {
                    tag: tag.clone(),
                    entries: Vec::new(),
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            // the same tag listed twice on one entry counts once
            if !group
                .entries
                .last()
                .is_some_and(|last| std::ptr::eq(*last, entry))
            {
                group.entries.push(entry);
            }
        }
    }

    groups.sort_by(|a, b| b.entries.len().cmp(&a.entries.len()));
    groups
}

/// Union the entries of the selected groups; shared entries appear once
pub fn union_selected<'a>(groups: &[TagGroup<'a>], selected: &[usize]) -> Vec<&'a CacheEntry> {
    let mut seen: HashSet<&Path> = HashSet::new();
    let mut targets = Vec::new();

    for group in selected.iter().filter_map(|&i| groups.get(i)) {
        for entry in &group.entries {
            if seen.insert(entry.full_path.as_path()) {
                targets.push(*entry);
            }
        }
    }

    targets
}

/// Entries that carry a URL, sorted alphabetically by URL
pub fn url_entries(entries: &[CacheEntry]) -> Vec<&CacheEntry> {
    let mut with_url: Vec<&CacheEntry> = entries.iter().filter(|e| e.url.is_some()).collect();
    with_url.sort_by(|a, b| {
        let (ua, ub) = (a.url.as_deref().unwrap_or(""), b.url.as_deref().unwrap_or(""));
        ua.to_lowercase()
            .cmp(&ub.to_lowercase())
            .then_with(|| ua.cmp(ub))
    });
    with_url
}

/// Remove each entry's file, tallying successes and failures
pub fn delete_entries(targets: &[&CacheEntry]) -> DeleteReport {
    let mut report = DeleteReport::default();

    for entry in targets {
        match fs::remove_file(&entry.full_path) {
            Ok(()) => {
                tracing::debug!(path = %entry.path, "deleted cache entry");
                report.deleted += 1;
            }
            Err(err) => {
                eprintln!("{}", format!("Failed to delete: {}", entry.path).red());
                tracing::debug!(path = %entry.path, error = %err, "delete failed");
                report.failed.push((entry.path.clone(), err.to_string()));
            }
        }
    }

    report
}

/// Interactive revalidation by tag
pub fn revalidate_by_tag(build_dir: &Path, prompter: &mut dyn Prompter) -> Result<RevalidateOutcome> {
    println!("{}", "Scanning cache for tags...\n".blue());

    let report = get_cache_entries(build_dir);
    report.log_warnings();

    let groups = group_by_tag(&report.entries);
    if groups.is_empty() {
        println!("{}", "No tags found in cache entries.".yellow());
        println!(
            "{}",
            "Cache entries may not have tags or cache is empty.".dimmed()
        );
        return Ok(RevalidateOutcome::NothingFound);
    }

    let choices: Vec<String> = groups
        .iter()
        .map(|g| {
            format!(
                "{} {}",
                g.tag.as_str().magenta(),
                format!(
                    "({} entries, {})",
                    g.entries.len(),
                    format_size(g.total_size())
                )
                .dimmed()
            )
        })
        .collect();

    let selected = prompter.select_many("Select tags to revalidate (clear cache):", &choices)?;
    if selected.is_empty() {
        println!("{}", "\nNo tags selected. Nothing to do.".yellow());
        return Ok(RevalidateOutcome::NoneSelected);
    }

    let targets = union_selected(&groups, &selected);
    confirm_and_delete(&targets, prompter)
}

/// Interactive revalidation by URL
pub fn revalidate_by_url(build_dir: &Path, prompter: &mut dyn Prompter) -> Result<RevalidateOutcome> {
    println!("{}", "Scanning cache for URLs...\n".blue());

    let report = get_cache_entries(build_dir);
    report.log_warnings();

    let candidates = url_entries(&report.entries);
    if candidates.is_empty() {
        println!("{}", "No URL entries found in cache.".yellow());
        println!(
            "{}",
            "Cache may be empty or entries don't have URLs.".dimmed()
        );
        return Ok(RevalidateOutcome::NothingFound);
    }

    let choices: Vec<String> = candidates
        .iter()
        .map(|e| {
            format!(
                "{} {}",
                e.url.as_deref().unwrap_or_default().cyan(),
                format!("({})", format_size(e.size)).dimmed()
            )
        })
        .collect();

    let selected = prompter.select_many("Select URLs to revalidate (clear cache):", &choices)?;
    if selected.is_empty() {
        println!("{}", "\nNo URLs selected. Nothing to do.".yellow());
        return Ok(RevalidateOutcome::NoneSelected);
    }

    let targets: Vec<&CacheEntry> = selected
        .iter()
        .filter_map(|&i| candidates.get(i).copied())
        .collect();
    confirm_and_delete(&targets, prompter)
}

fn confirm_and_delete(
    targets: &[&CacheEntry],
    prompter: &mut dyn Prompter,
) -> Result<RevalidateOutcome> {
    println!(
        "\nWill delete {} cache entries\n",
        targets.len().to_string().as_str().green()
    );

    if !prompter.confirm(CONFIRM_PROMPT, true)? {
        println!(
            "{}",
            "\nCancelled. No cache entries were deleted.".yellow()
        );
        return Ok(RevalidateOutcome::Cancelled);
    }

    let report = delete_entries(targets);

    println!();
    println!(
        "{}",
        format!("✓ Successfully deleted {} cache entries", report.deleted).green()
    );
    if !report.failed.is_empty() {
        println!(
            "{}",
            format!("✗ Failed to delete {} entries", report.failed.len()).red()
        );
    }

    Ok(RevalidateOutcome::Completed(report))
}

/// Run the tag flow against the real terminal
pub fn run_revalidate_tag(build_dir: &Path) -> Result<()> {
    let mut prompter = TerminalPrompter::new();
    revalidate_by_tag(build_dir, &mut prompter)?;
    Ok(())
}

/// Run the URL flow against the real terminal
pub fn run_revalidate_url(build_dir: &Path) -> Result<()> {
    let mut prompter = TerminalPrompter::new();
    revalidate_by_url(build_dir, &mut prompter)?;
    Ok(())
}
