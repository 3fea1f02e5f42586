//! Cache module - Reads the framework's on-disk cache
//!
//! Provides:
//! - Directory scanning and aggregate statistics
//! - Best-effort metadata sniffing (own document, sidecar, leading brace)

pub mod meta;
pub mod scanner;
