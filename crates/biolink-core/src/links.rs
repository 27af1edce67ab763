//! Link collection service
//!
//! Ordered-list CRUD over the link document. Every mutation is a full
//! read-modify-write of the document; within one process those cycles are
//! serialized by a write lock so concurrent requests cannot drop each
//! other's changes. Writers in other processes are not coordinated.

use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{LinkItem, LinkPatch};
use crate::storage::{DocumentStore, StorageError};

/// Errors returned by link operations
#[derive(Error, Debug)]
pub enum LinkError {
    /// No link has the requested id
    #[error("Link not found: {id}")]
    NotFound { id: String },

    /// A link with this id is already stored
    #[error("A link with id '{id}' already exists")]
    DuplicateId { id: String },

    /// Required fields are missing
    #[error("Invalid link: {0}")]
    Validation(String),

    /// The link document could not be read or written
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type LinkResult<T> = Result<T, LinkError>;

/// Operations over the ordered link collection
pub struct LinkService {
    doc: Box<dyn DocumentStore<Vec<LinkItem>>>,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for LinkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkService").finish_non_exhaustive()
    }
}

impl LinkService {
    pub fn new(doc: impl DocumentStore<Vec<LinkItem>> + 'static) -> Self {
        Self {
            doc: Box::new(doc),
            write_lock: Mutex::new(()),
        }
    }

    /// The full stored sequence, hidden links included
    pub fn list(&self) -> LinkResult<Vec<LinkItem>> {
        let links = self.doc.load()?;
        debug!("Listed {} links", links.len());
        Ok(links)
    }

    /// A single link by id
    pub fn get(&self, id: &str) -> LinkResult<LinkItem> {
        self.doc
            .load()?
            .into_iter()
            .find(|link| link.id == id)
            .ok_or_else(|| LinkError::NotFound { id: id.to_string() })
    }

    /// Append a link to the end of the collection
    ///
    /// The caller supplies the id. Empty required fields and ids that are
    /// already taken are rejected before anything is written.
    pub fn create(&self, item: LinkItem) -> LinkResult<LinkItem> {
        let missing = item.missing_fields();
        if !missing.is_empty() {
            return Err(LinkError::Validation(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        let _guard = self.lock();
        let mut links = self.doc.load()?;
        if links.iter().any(|link| link.id == item.id) {
            return Err(LinkError::DuplicateId { id: item.id });
        }

        links.push(item.clone());
        self.doc.replace(&links)?;

        info!("Created link {} ({})", item.id, item.title);
        Ok(item)
    }

    /// Merge `patch` into the link with `id`, keeping its position
    pub fn update_by_id(&self, id: &str, patch: &LinkPatch) -> LinkResult<LinkItem> {
        let _guard = self.lock();
        let mut links = self.doc.load()?;

        let link = links
            .iter_mut()
            .find(|link| link.id == id)
            .ok_or_else(|| LinkError::NotFound { id: id.to_string() })?;
        link.apply(patch);
        let updated = link.clone();

        self.doc.replace(&links)?;

        info!("Updated link {}", id);
        Ok(updated)
    }

    /// Remove the link with `id` and return it
    ///
    /// Nothing is written when the id is absent.
    pub fn delete_by_id(&self, id: &str) -> LinkResult<LinkItem> {
        let _guard = self.lock();
        let mut links = self.doc.load()?;

        let index = links
            .iter()
            .position(|link| link.id == id)
            .ok_or_else(|| LinkError::NotFound { id: id.to_string() })?;
        let removed = links.remove(index);

        self.doc.replace(&links)?;

        info!("Deleted link {} ({})", removed.id, removed.title);
        Ok(removed)
    }

    /// Overwrite the whole collection with `links`, verbatim
    ///
    /// This is how reordering works. The sequence is trusted as-is: it is not
    /// checked to be a permutation of the stored links, and two concurrent
    /// reorders resolve as last write wins.
    pub fn replace_all(&self, links: Vec<LinkItem>) -> LinkResult<()> {
        let _guard = self.lock();
        self.doc.replace(&links)?;

        info!("Replaced link collection ({} links)", links.len());
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}
