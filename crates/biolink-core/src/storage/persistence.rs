//! JSON document persistence
//!
//! Each document lives in its own file and is always read and written whole.
//! Writes are pretty-printed (2-space indent) and atomic (write to temp file,
//! then rename) so a crash never leaves a half-written document behind.
//!
//! Storage location: `~/.local/share/biolink/` (configurable via `Config`)
//!
//! Files:
//! - `links.json` - JSON array of link items
//! - `settings.json` - single settings object

use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use super::error::{StorageError, StorageResult};
use super::DocumentStore;

/// A whole-file JSON document of type `T`
pub struct JsonFile<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for JsonFile<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFile").field("path", &self.path).finish()
    }
}

impl<T> JsonFile<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the document exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl<T: Serialize> JsonFile<T> {
    /// Write `initial` if the file does not exist yet
    ///
    /// Returns `true` when the document was created. An existing file is
    /// never touched, even if it cannot be parsed.
    pub fn seed_if_missing(&self, initial: &T) -> StorageResult<bool> {
        if self.exists() {
            return Ok(false);
        }
        write_json(&self.path, initial)?;
        Ok(true)
    }
}

impl<T> DocumentStore<T> for JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> StorageResult<T> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::from_read_io(e, self.path.clone()))?;

        let value = serde_json::from_str(&content).map_err(|source| StorageError::InvalidFormat {
            path: self.path.clone(),
            source,
        })?;

        debug!("Loaded document from {:?}", self.path);
        Ok(value)
    }

    fn replace(&self, value: &T) -> StorageResult<()> {
        write_json(&self.path, value)?;
        debug!("Replaced document at {:?}", self.path);
        Ok(())
    }
}

/// Serialize `value` with 2-space indentation and write it atomically
fn write_json<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| StorageError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, json.as_bytes())
}

/// Write data to a file atomically
///
/// 1. Write to a uniquely named temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// Concurrent writers never share a temp file, so the target always holds
/// one complete document.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    // Same directory as the target so the rename stays on one filesystem
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| StorageError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut file =
        NamedTempFile::new_in(dir).map_err(|e| StorageError::from_io(e, dir.to_path_buf()))?;
    let temp_path = file.path().to_path_buf();

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.as_file()
        .sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.persist(path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}
