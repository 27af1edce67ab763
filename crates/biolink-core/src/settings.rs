//! Settings service
//!
//! Read and full-replace over the settings document. The settings and link
//! documents are independent; nothing here touches the links.

use std::sync::Mutex;

use tracing::info;

use crate::models::Settings;
use crate::storage::{DocumentStore, StorageResult};

/// Operations over the page settings
pub struct SettingsService {
    doc: Box<dyn DocumentStore<Settings>>,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for SettingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsService").finish_non_exhaustive()
    }
}

impl SettingsService {
    pub fn new(doc: impl DocumentStore<Settings> + 'static) -> Self {
        Self {
            doc: Box::new(doc),
            write_lock: Mutex::new(()),
        }
    }

    /// Current settings
    pub fn get(&self) -> StorageResult<Settings> {
        self.doc.load()
    }

    /// Overwrite the settings document; no field is validated
    pub fn replace(&self, settings: &Settings) -> StorageResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.doc.replace(settings)?;
        info!("Settings updated (title: {:?})", settings.title);
        Ok(())
    }
}
