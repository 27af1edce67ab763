//! Unified storage interface
//!
//! The `Store` opens both documents from the configured data directory and
//! hands out the services that operate on them.
//!
//! ## First run
//!
//! Missing documents are seeded: an empty link array and empty settings.
//! A document that exists but cannot be parsed is left alone and reported
//! when it is next read.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::open()?;
//!
//! store.links().create(LinkItem::new("Blog", "https://example.com"))?;
//! let settings = store.settings().get()?;
//! ```

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::links::LinkService;
use crate::models::{LinkItem, Settings};
use crate::settings::SettingsService;
use crate::storage::{JsonFile, MemoryDocument};

/// Both documents and their services
#[derive(Debug)]
pub struct Store {
    links: LinkService,
    settings: SettingsService,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        config.ensure_data_dir()?;

        let links_doc: JsonFile<Vec<LinkItem>> = JsonFile::new(config.links_path());
        if links_doc
            .seed_if_missing(&Vec::new())
            .context("Failed to create link document")?
        {
            info!("Created empty link document at {:?}", links_doc.path());
        }

        let settings_doc: JsonFile<Settings> = JsonFile::new(config.settings_path());
        if settings_doc
            .seed_if_missing(&Settings::default())
            .context("Failed to create settings document")?
        {
            info!("Created default settings at {:?}", settings_doc.path());
        }

        Ok(Self {
            links: LinkService::new(links_doc),
            settings: SettingsService::new(settings_doc),
        })
    }

    /// A store that never touches the filesystem
    pub fn in_memory(links: Vec<LinkItem>, settings: Settings) -> Self {
        Self {
            links: LinkService::new(MemoryDocument::new(links)),
            settings: SettingsService::new(MemoryDocument::new(settings)),
        }
    }

    /// Link collection operations
    pub fn links(&self) -> &LinkService {
        &self.links
    }

    /// Settings operations
    pub fn settings(&self) -> &SettingsService {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_open_seeds_documents() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let store = Store::open_with_config(config.clone()).unwrap();

        assert!(config.links_path().exists());
        assert!(config.settings_path().exists());
        assert!(store.links().list().unwrap().is_empty());
        assert_eq!(store.settings().get().unwrap(), Settings::default());
    }

    #[test]
    fn test_open_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().join("nested").join("data"),
            ..Config::default()
        };

        Store::open_with_config(config.clone()).unwrap();
        assert!(config.links_path().exists());
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let store = Store::open_with_config(config.clone()).unwrap();
            store
                .links()
                .create(LinkItem::with_id("1", "Persistent", "https://p.example"))
                .unwrap();
            store
                .settings()
                .replace(&Settings::new("Me", "Hi", ""))
                .unwrap();
        }

        let store = Store::open_with_config(config).unwrap();
        let links = store.links().list().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Persistent");
        assert_eq!(store.settings().get().unwrap().title, "Me");
    }

    #[test]
    fn test_open_keeps_corrupt_document() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        std::fs::write(config.links_path(), "oops").unwrap();

        let store = Store::open_with_config(config.clone()).unwrap();
        assert!(store.links().list().is_err());
        assert_eq!(std::fs::read_to_string(config.links_path()).unwrap(), "oops");
    }

    #[test]
    fn test_documents_are_independent() {
        let store = Store::in_memory(
            vec![LinkItem::with_id("1", "A", "https://a.example")],
            Settings::default(),
        );

        store
            .settings()
            .replace(&Settings::new("T", "S", ""))
            .unwrap();
        assert_eq!(store.links().list().unwrap().len(), 1);

        store.links().replace_all(Vec::new()).unwrap();
        assert_eq!(store.settings().get().unwrap().title, "T");
    }
}
