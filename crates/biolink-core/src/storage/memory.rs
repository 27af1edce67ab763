//! In-memory document backend
//!
//! Holds a document behind a mutex. Used by tests and for running the
//! services without touching the filesystem.

use std::sync::Mutex;

use super::error::StorageResult;
use super::DocumentStore;

/// A document kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryDocument<T> {
    value: Mutex<T>,
}

impl<T> MemoryDocument<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
        }
    }
}

impl<T: Clone + Send> DocumentStore<T> for MemoryDocument<T> {
    fn load(&self) -> StorageResult<T> {
        let guard = self.value.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn replace(&self, value: &T) -> StorageResult<()> {
        let mut guard = self.value.lock().unwrap_or_else(|e| e.into_inner());
        *guard = value.clone();
        Ok(())
    }
}
