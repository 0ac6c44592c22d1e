//! Storage traits and error types
//!
//! This module defines the trait interface for archive sinks and
//! associated error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Sink for archived content
pub trait Storage {
    /// Writes a page verbatim, creating missing parent directories.
    /// An existing file at `path` is overwritten.
    fn save_page(&mut self, path: &Path, content: &str) -> StorageResult<()>;

    /// Appends each line plus a newline to a flat text file, creating it
    /// (and its parent directories) if needed
    fn append_lines(&mut self, path: &Path, lines: &[String]) -> StorageResult<()>;
}
