//! Backends module - External collaborators
//!
//! Provides:
//! - prompt: Interactive multi-select and confirmation (dialoguer)

pub mod prompt;
