//! Cache directory scanner
//!
//! Walks `<.next>/cache` depth-first with walkdir, turning every regular file
//! into a `CacheEntry`. Failures on individual files or directories are
//! recorded as warnings and the walk continues.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use crate::cache::meta::{apply_metadata, read_cache_metadata};
use crate::core::model::{CacheEntry, CacheType, ScanReport, ScanWarning};
use crate::core::paths::{cache_dir, make_relative, normalize_path};

/// Scan the cache directory inside a `.next` build directory.
///
/// A missing cache directory is not an error: the report is simply empty.
pub fn get_cache_entries(build_dir: &Path) -> ScanReport {
    let cache = cache_dir(build_dir);
    if !cache.exists() {
        tracing::debug!(path = %cache.display(), "cache directory does not exist");
        return ScanReport::default();
    }

    let (entries, warnings) = scan_cache_directory(&cache);
    ScanReport::new(entries, warnings)
}

/// Collect every regular file under `cache` (files only, directories are descended into)
pub fn scan_cache_directory(cache: &Path) -> (Vec<CacheEntry>, Vec<ScanWarning>) {
    let mut entries = Vec::new();
    let mut warnings = Vec::new();

    let walker = WalkDir::new(cache)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for item in walker {
        let item = match item {
            Ok(item) => item,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| make_relative(p, cache).unwrap_or_else(|| normalize_path(p)))
                    .unwrap_or_default();
                warnings.push(ScanWarning::new(path, format!("error scanning: {}", err)));
                continue;
            }
        };

        if !item.file_type().is_file() {
            continue;
        }

        match build_entry(cache, &item) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                let path = make_relative(item.path(), cache).unwrap_or_default();
                warnings.push(ScanWarning::new(path, format!("{:#}", err)));
            }
        }
    }

    tracing::debug!(
        entries = entries.len(),
        warnings = warnings.len(),
        "cache scan finished"
    );

    (entries, warnings)
}

fn build_entry(cache: &Path, item: &DirEntry) -> Result<CacheEntry> {
    let full_path = item.path();
    let relative = make_relative(full_path, cache)
        .with_context(|| format!("{} is outside the cache directory", full_path.display()))?;
    let relative_dir = full_path
        .parent()
        .and_then(|dir| make_relative(dir, cache))
        .unwrap_or_default();

    let metadata = item
        .metadata()
        .with_context(|| format!("failed to stat {}", relative))?;
    let modified: DateTime<Utc> = metadata
        .modified()
        .with_context(|| format!("no modification time for {}", relative))?
        .into();

    let mut entry = CacheEntry::new(
        relative,
        full_path.to_path_buf(),
        metadata.len(),
        modified,
        CacheType::detect(&relative_dir),
    );

    let file_name = item.file_name().to_string_lossy();
    if let Some((source, document)) = read_cache_metadata(full_path, &file_name) {
        tracing::debug!(path = %entry.path, ?source, "read cache metadata");
        apply_metadata(&mut entry, document);
    }

    Ok(entry)
}
