//! Cache entry model
//!
//! Every scan produces a fresh `ScanReport`: the flat entry list, aggregate
//! statistics, and any warnings raised while walking the tree.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::path::PathBuf;

/// The kind of cache artifact, derived from the directory it lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    Fetch,
    Image,
    Other,
}

impl CacheType {
    /// Classify by the relative directory path accumulated during the walk
    pub fn detect(relative_dir: &str) -> Self {
        if relative_dir.contains("fetch-cache") {
            CacheType::Fetch
        } else if relative_dir.contains("images") {
            CacheType::Image
        } else {
            CacheType::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheType::Fetch => "fetch",
            CacheType::Image => "image",
            CacheType::Other => "other",
        }
    }
}

impl std::fmt::Display for CacheType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Revalidation policy recorded by the framework's cache writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revalidate {
    /// `revalidate: false`
    Never,
    /// Interval in seconds (0 means revalidate on every request)
    Seconds(u64),
}

impl Serialize for Revalidate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Revalidate::Never => serializer.serialize_bool(false),
            Revalidate::Seconds(secs) => serializer.serialize_u64(*secs),
        }
    }
}

/// One regular file discovered under the cache directory
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    /// Path relative to the cache directory, using '/' as separator
    pub path: String,

    /// Absolute path on disk (used for deletion)
    pub full_path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Last modification time
    pub modified: DateTime<Utc>,

    #[serde(rename = "type")]
    pub cache_type: CacheType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub revalidate: Option<Revalidate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Raw parsed metadata document, kept for extraction only
    #[serde(skip)]
    pub metadata: Option<serde_json::Value>,
}

impl CacheEntry {
    pub fn new(
        path: impl Into<String>,
        full_path: PathBuf,
        size: u64,
        modified: DateTime<Utc>,
        cache_type: CacheType,
    ) -> Self {
        Self {
            path: path.into(),
            full_path,
            size,
            modified,
            cache_type,
            url: None,
            revalidate: None,
            tags: None,
            metadata: None,
        }
    }

    /// Tags, or an empty slice when none were recorded
    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

/// Count and size for one cache type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeStats {
    #[serde(rename = "type")]
    pub cache_type: CacheType,
    pub count: usize,
    pub size: u64,
}

/// Aggregate statistics over a set of entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_size: u64,
    pub total_count: usize,
    /// Per-type buckets, in the order each type was first seen
    pub by_type: Vec<TypeStats>,
}

impl Stats {
    pub fn from_entries(entries: &[CacheEntry]) -> Self {
        let mut stats = Stats::default();
        for entry in entries {
            stats.record(entry);
        }
        stats
    }

    fn record(&mut self, entry: &CacheEntry) {
        self.total_size += entry.size;
        self.total_count += 1;

        match self
            .by_type
            .iter_mut()
            .find(|bucket| bucket.cache_type == entry.cache_type)
        {
            Some(bucket) => {
                bucket.count += 1;
                bucket.size += entry.size;
            }
            None => self.by_type.push(TypeStats {
                cache_type: entry.cache_type,
                count: 1,
                size: entry.size,
            }),
        }
    }

    #[allow(dead_code)]
    pub fn for_type(&self, cache_type: CacheType) -> Option<&TypeStats> {
        self.by_type.iter().find(|b| b.cache_type == cache_type)
    }
}

/// A recoverable problem encountered while scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    pub path: String,
    pub message: String,
}

impl ScanWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Everything a single scan produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub entries: Vec<CacheEntry>,
    pub stats: Stats,
    #[serde(skip)]
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    pub fn new(entries: Vec<CacheEntry>, warnings: Vec<ScanWarning>) -> Self {
        let stats = Stats::from_entries(&entries);
        Self {
            entries,
            stats,
            warnings,
        }
    }

    /// Emit buffered warnings through the logging layer
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!(path = %warning.path, "{}", warning.message);
        }
    }
}
