//! Error types for input resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving input frames.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// One or more explicitly listed files do not exist.
    #[error("Input files not found: {}", display_paths(.paths))]
    MissingInput { paths: Vec<PathBuf> },

    /// A pattern matched nothing.
    #[error("No files match the pattern: {pattern}")]
    NoMatchingFiles { pattern: String },

    /// A pattern could not be parsed as a glob.
    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The frames have no extension, or one no encoder can read.
    #[error("Unsupported file type '{extension}' (expected one of: {expected})")]
    UnsupportedFileType { extension: String, expected: String },

    /// An explicit file list was empty.
    #[error("No input files given")]
    EmptyInput,
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
