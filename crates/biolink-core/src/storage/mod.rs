//! Storage layer
//!
//! Whole-document persistence for the link collection and the settings.
//!
//! ## Architecture
//!
//! - [`DocumentStore`]: load/replace contract shared by all backends
//! - [`JsonFile`]: one pretty-printed JSON file per document
//! - [`MemoryDocument`]: in-process backend for tests
//!
//! There are no partial updates: callers read the full document, change it
//! in memory, and replace it.

pub mod error;
pub mod memory;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryDocument;
pub use persistence::JsonFile;

/// Durable whole-document read/replace
pub trait DocumentStore<T>: Send + Sync {
    /// Read the full current document
    fn load(&self) -> StorageResult<T>;

    /// Overwrite the full document
    fn replace(&self, value: &T) -> StorageResult<()>;
}
