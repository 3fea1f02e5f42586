//! Error types surfaced to the user

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error(".next directory not found at {}. Are you in a Next.js project?", .0.display())]
    MissingBuildDir(PathBuf),
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
    #[error("prompt failed: {0}")]
    Prompt(String),
}
