//! Flows module - User-facing workflows
//!
//! Provides:
//! - list: Cache inventory table and summary
//! - revalidate: Interactive deletion by tag or URL

pub mod list;
pub mod revalidate;
