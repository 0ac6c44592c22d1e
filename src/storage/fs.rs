use crate::storage::traits::{Storage, StorageError, StorageResult};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Filesystem-backed archive sink
///
/// Tracks which paths were written during this run so that two sibling
/// titles sanitizing to the same name show up in the log instead of
/// silently replacing each other.
#[derive(Debug, Default)]
pub struct FsStorage {
    /// Every page path written this run; held until the run ends and used
    /// only for the collision warning
    written: HashSet<PathBuf>,
}

impl FsStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct page paths written in this run
    pub fn pages_written(&self) -> usize {
        self.written.len()
    }
}

fn ensure_parent(path: &Path) -> StorageResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            tracing::debug!("Creating directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

impl Storage for FsStorage {
    fn save_page(&mut self, path: &Path, content: &str) -> StorageResult<()> {
        ensure_parent(path)?;

        if !self.written.insert(path.to_path_buf()) {
            tracing::warn!(
                "Overwriting {} written earlier in this run (title collision)",
                path.display()
            );
        }

        fs::write(path, content).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn append_lines(&mut self, path: &Path, lines: &[String]) -> StorageResult<()> {
        ensure_parent(path)?;

        let to_write_err = |source: std::io::Error| StorageError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(to_write_err)?;

        for line in lines {
            writeln!(file, "{}", line).map_err(to_write_err)?;
        }

        Ok(())
    }
}
