//! Storage module for persisting archived content
//!
//! This module handles every filesystem side effect of a run:
//! - Writing landing and topic pages into the mirrored archive tree
//! - Creating intermediate directories
//! - Appending extracted roster text to a flat file

mod fs;
mod traits;

pub use fs::FsStorage;
pub use traits::{Storage, StorageError, StorageResult};

use std::path::{Path, PathBuf};

/// File name of the saved landing page
pub const INDEX_FILE: &str = "index.html";

/// Path a topic page is archived under: `<directory>/<name>.html`
pub fn topic_path(directory: &Path, name: &str) -> PathBuf {
    directory.join(format!("{}.html", name))
}
