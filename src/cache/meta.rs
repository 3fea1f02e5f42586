//! Cache metadata sniffing
//!
//! The framework writes fetch-cache entries either as self-describing JSON
//! documents or as opaque blobs with a `<file>.meta` sidecar. Metadata is read
//! best-effort: anything unreadable or unparsable is simply "no metadata".

use serde_json::Value;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::core::model::{CacheEntry, Revalidate};
use crate::core::paths::sidecar_path;

/// Where a metadata document was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaSource {
    /// The file itself has a `.json` or `.meta` extension
    OwnDocument,
    /// A `<file>.meta` sidecar sits next to the file
    Sidecar,
    /// The file content starts with `{` or `[`
    Sniffed,
}

/// Try to read a metadata document for a cache file
pub fn read_cache_metadata(full_path: &Path, file_name: &str) -> Option<(MetaSource, Value)> {
    if file_name.ends_with(".json") || file_name.ends_with(".meta") {
        return parse_file(full_path).map(|v| (MetaSource::OwnDocument, v));
    }

    let sidecar = sidecar_path(full_path);
    if sidecar.exists() {
        return parse_file(&sidecar).map(|v| (MetaSource::Sidecar, v));
    }

    if !starts_like_document(full_path) {
        return None;
    }
    parse_file(full_path).map(|v| (MetaSource::Sniffed, v))
}

/// Peek at the first byte only; cache blobs can be large
fn starts_like_document(path: &Path) -> bool {
    let mut first = [0u8; 1];
    match File::open(path).and_then(|mut file| file.read_exact(&mut first)) {
        Ok(()) => first[0] == b'{' || first[0] == b'[',
        Err(_) => false,
    }
}

fn parse_file(path: &Path) -> Option<Value> {
    let content = fs::read(path).ok()?;
    serde_json::from_slice(&content).ok()
}

/// Copy the fields we understand out of a metadata document onto the entry
pub fn apply_metadata(entry: &mut CacheEntry, metadata: Value) {
    if let Some(url) = metadata
        .get("data")
        .and_then(|data| data.get("url"))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
    {
        entry.url = Some(url.to_string());
    }

    if let Some(revalidate) = metadata.get("revalidate").and_then(parse_revalidate) {
        entry.revalidate = Some(revalidate);
    }

    if let Some(tags) = metadata.get("tags").and_then(Value::as_array) {
        entry.tags = Some(
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        );
    }

    entry.metadata = Some(metadata);
}

/// `false` means never; a non-negative whole number is an interval in seconds
fn parse_revalidate(value: &Value) -> Option<Revalidate> {
    match value {
        Value::Bool(false) => Some(Revalidate::Never),
        Value::Number(n) => {
            if let Some(secs) = n.as_u64() {
                return Some(Revalidate::Seconds(secs));
            }
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| Revalidate::Seconds(f as u64))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::CacheType;
    use chrono::Utc;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn blank_entry() -> CacheEntry {
        CacheEntry::new(
            "fetch-cache/abc",
            PathBuf::from("/c/fetch-cache/abc"),
            0,
            Utc::now(),
            CacheType::Fetch,
        )
    }

    #[test]
    fn test_reads_own_json_document() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("entry.json");
        fs::write(&path, r#"{"revalidate": 60}"#).unwrap();

        let (source, value) = read_cache_metadata(&path, "entry.json").unwrap();
        assert_eq!(source, MetaSource::OwnDocument);
        assert_eq!(value["revalidate"], 60);
    }

    #[test]
    fn test_invalid_own_document_does_not_fall_through() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "not json").unwrap();
        fs::write(temp.path().join("broken.json.meta"), r#"{"tags":["x"]}"#).unwrap();

        assert!(read_cache_metadata(&path, "broken.json").is_none());
    }

    #[test]
    fn test_reads_sidecar() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("abc");
        fs::write(&path, [0u8, 159, 146, 150]).unwrap();
        fs::write(temp.path().join("abc.meta"), r#"{"tags":["t1"]}"#).unwrap();

        let (source, value) = read_cache_metadata(&path, "abc").unwrap();
        assert_eq!(source, MetaSource::Sidecar);
        assert_eq!(value["tags"][0], "t1");
    }

    #[test]
    fn test_sniffs_leading_brace() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("abc");
        fs::write(&path, r#"{"kind":"FETCH","data":{"url":"https://api"}}"#).unwrap();

        let (source, value) = read_cache_metadata(&path, "abc").unwrap();
        assert_eq!(source, MetaSource::Sniffed);
        assert_eq!(value["data"]["url"], "https://api");
    }

    #[test]
    fn test_no_metadata_for_opaque_blob() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("blob");
        fs::write(&path, [0u8, 1, 2, 3]).unwrap();
        assert!(read_cache_metadata(&path, "blob").is_none());

        let path = temp.path().join("half");
        fs::write(&path, "{ not really").unwrap();
        assert!(read_cache_metadata(&path, "half").is_none());
    }

    #[test]
    fn test_large_blob_is_not_sniffed() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("big");
        let mut content = vec![b'x'];
        content.extend(std::iter::repeat(b'{').take(4 * 1024 * 1024));
        fs::write(&path, content).unwrap();
        assert!(read_cache_metadata(&path, "big").is_none());

        let empty = temp.path().join("empty");
        fs::write(&empty, "").unwrap();
        assert!(read_cache_metadata(&empty, "empty").is_none());

        let array = temp.path().join("array");
        fs::write(&array, r#"[{"tags":["t"]}]"#).unwrap();
        let (source, value) = read_cache_metadata(&array, "array").unwrap();
        assert_eq!(source, MetaSource::Sniffed);
        assert!(value.is_array());
    }

    #[test]
    fn test_apply_metadata_empty_url_is_absent() {
        let mut entry = blank_entry();
        apply_metadata(&mut entry, json!({"data": {"url": ""}, "tags": ["t1"]}));
        assert!(entry.url.is_none());
        assert_eq!(entry.tag_list(), ["t1"]);
    }

    #[test]
    fn test_apply_metadata_extracts_fields() {
        let mut entry = blank_entry();
        apply_metadata(
            &mut entry,
            json!({"data": {"url": "https://x"}, "revalidate": 60, "tags": ["t1", "t2"]}),
        );

        assert_eq!(entry.url.as_deref(), Some("https://x"));
        assert_eq!(entry.revalidate, Some(Revalidate::Seconds(60)));
        assert_eq!(entry.tag_list(), ["t1", "t2"]);
        assert!(entry.metadata.is_some());
    }

    #[test]
    fn test_apply_metadata_revalidate_false() {
        let mut entry = blank_entry();
        apply_metadata(&mut entry, json!({"revalidate": false}));
        assert_eq!(entry.revalidate, Some(Revalidate::Never));
        assert!(entry.url.is_none());
        assert!(entry.tags.is_none());
    }

    #[test]
    fn test_apply_metadata_ignores_unusable_values() {
        let mut entry = blank_entry();
        apply_metadata(
            &mut entry,
            json!({"data": {"url": 42}, "revalidate": null, "tags": "t1"}),
        );
        assert!(entry.url.is_none());
        assert!(entry.revalidate.is_none());
        assert!(entry.tags.is_none());

        let mut entry = blank_entry();
        apply_metadata(&mut entry, json!({"revalidate": -5, "tags": [1, "ok"]}));
        assert!(entry.revalidate.is_none());
        assert_eq!(entry.tag_list(), ["ok"]);
    }

    #[test]
    fn test_apply_metadata_whole_float_revalidate() {
        let mut entry = blank_entry();
        apply_metadata(&mut entry, json!({"revalidate": 120.0}));
        assert_eq!(entry.revalidate, Some(Revalidate::Seconds(120)));

        let mut entry = blank_entry();
        apply_metadata(&mut entry, json!({"revalidate": 1.5}));
        assert!(entry.revalidate.is_none());
    }

    #[test]
    fn test_apply_metadata_array_document() {
        let mut entry = blank_entry();
        apply_metadata(&mut entry, json!([1, 2, 3]));
        assert!(entry.url.is_none());
        assert!(entry.revalidate.is_none());
        assert!(entry.tags.is_none());
        assert!(entry.metadata.is_some());
    }
}
