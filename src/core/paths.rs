//! Path helpers
//!
//! Entry paths are normalized to use '/' as separator and are relative to the
//! cache directory.

use std::path::{Path, PathBuf};

/// Name of the framework build directory expected under the project root
pub const BUILD_DIR: &str = ".next";

/// Name of the cache directory inside the build directory
pub const CACHE_DIR: &str = "cache";

/// Normalize a path to use '/' as separator (for cross-platform consistency)
#[cfg(windows)]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// On Unix '\\' is a legal file name character and is kept as-is
#[cfg(not(windows))]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Get the `.next` build directory for a project root
pub fn build_dir(project_root: &Path) -> PathBuf {
    project_root.join(BUILD_DIR)
}

/// Get the cache directory inside a `.next` build directory
pub fn cache_dir(build_dir: &Path) -> PathBuf {
    build_dir.join(CACHE_DIR)
}

/// Path of the sidecar metadata file for a cache file (`<file>.meta`)
pub fn sidecar_path(full_path: &Path) -> PathBuf {
    let mut os = full_path.as_os_str().to_owned();
    os.push(".meta");
    PathBuf::from(os)
}
