//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Cache entry model (CacheEntry, Stats, ScanReport)
//! - Human-readable formatting
//! - Table/JSON rendering
//! - Path helpers
//! - Error types and logging setup

pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod paths;
pub mod render;
