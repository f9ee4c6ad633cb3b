//! In-memory document store for unit testing.
//!
//! Lets tests drive the persistence controller without touching the file
//! system, and inject read/write failures to exercise error paths.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::store::{DocumentStore, StoreError};

/// A [`DocumentStore`] backed by a mutex-guarded string.
pub struct MemoryStore {
    contents: Mutex<Option<String>>,
    fail_reads: Mutex<bool>,
    fail_writes: Mutex<bool>,
    write_count: Mutex<u32>,
}

impl MemoryStore {
    /// Creates an empty store ("no document yet").
    pub fn new() -> Self {
        Self {
            contents: Mutex::new(None),
            fail_reads: Mutex::new(false),
            fail_writes: Mutex::new(false),
            write_count: Mutex::new(0),
        }
    }

    /// Creates a store pre-loaded with `text` as the stored document.
    pub fn with_document(text: impl Into<String>) -> Self {
        let store = Self::new();
        *store.contents.lock().expect("lock poisoned") = Some(text.into());
        store
    }

    /// Returns a copy of the currently stored text, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().expect("lock poisoned").clone()
    }

    /// Makes every subsequent `read` fail with a permission error.
    pub fn fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().expect("lock poisoned") = fail;
    }

    /// Makes every subsequent `write` fail with a permission error.
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().expect("lock poisoned") = fail;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> u32 {
        *self.write_count.lock().expect("lock poisoned")
    }

    fn injected_error(&self) -> StoreError {
        StoreError::Io {
            path: PathBuf::from("<memory>"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "injected failure"),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        if *self.fail_reads.lock().expect("lock poisoned") {
            return Err(self.injected_error());
        }
        Ok(self.contents())
    }

    fn write(&self, text: &str) -> Result<(), StoreError> {
        if *self.fail_writes.lock().expect("lock poisoned") {
            return Err(self.injected_error());
        }
        *self.contents.lock().expect("lock poisoned") = Some(text.to_string());
        *self.write_count.lock().expect("lock poisoned") += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
