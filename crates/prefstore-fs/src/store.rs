//! The storage boundary: reading and writing the document text.
//!
//! The controller only needs three things from storage — read (with
//! "missing" as a non-error), write (creating parent directories), and a
//! human-readable description for log lines — so that is the whole
//! [`DocumentStore`] trait. [`FileStore`] is the real implementation;
//! [`crate::memory::MemoryStore`] backs tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors for storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    ///
    /// "File does not exist" is never reported this way on read; a missing
    /// document is `Ok(None)`.
    #[error("I/O error accessing document at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Storage for one configuration document.
pub trait DocumentStore: Send + Sync {
    /// Reads the stored document text.
    ///
    /// Returns `Ok(None)` when no document exists yet (first run); that is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for any failure other than "missing".
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Writes the document text, creating parent directories if missing.
    ///
    /// Best-effort overwrite: there is no atomic replace or journal, per the
    /// single-writer assumption.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on any file-system failure; the caller
    /// surfaces it, since there is no safe implicit fallback for a failed
    /// write.
    fn write(&self, text: &str) -> Result<(), StoreError>;

    /// Human-readable location for log lines (a path, `"<memory>"`, ...).
    fn describe(&self) -> String;
}

/// [`DocumentStore`] over a single UTF-8 text file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write(&self, text: &str) -> Result<(), StoreError> {
        // Ensure the directory exists before writing.
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
