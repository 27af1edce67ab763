//! Biolink Core Library
//!
//! This crate provides the core functionality for biolink, a personal
//! link-in-bio page: a public landing page with a profile header and an
//! ordered list of links, managed through an admin client.
//!
//! # Architecture
//!
//! - **Documents**: two whole-file JSON documents, the link collection and
//!   the settings, read and rewritten in full on every mutation
//! - **Services**: CRUD over the link collection and read/replace over the
//!   settings
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::open()?;
//!
//! // Add a link
//! store.links().create(LinkItem::new("Blog", "https://example.com"))?;
//!
//! // Render the public page
//! let links = store.links().list()?;
//! let settings = store.settings().get()?;
//! let html = PublicPage::new(&settings, &links).to_html();
//! ```
//!
//! # Modules
//!
//! - `store`: Opens both documents (main entry point)
//! - `models`: Link items, partial updates, and settings
//! - `links`: Link collection service
//! - `settings`: Settings service
//! - `ordering`: Move-up/move-down computation for reordering
//! - `render`: Public page rendering
//! - `storage`: Document persistence
//! - `config`: Application configuration

pub mod config;
pub mod links;
pub mod models;
pub mod ordering;
pub mod render;
pub mod settings;
pub mod storage;
pub mod store;

pub use config::Config;
pub use links::{LinkError, LinkResult, LinkService};
pub use models::{Ack, LinkItem, LinkPatch, Settings, PLACEHOLDER_IMAGE};
pub use ordering::Direction;
pub use render::{PublicPage, PLACEHOLDER_SVG};
pub use settings::SettingsService;
pub use storage::{DocumentStore, JsonFile, MemoryDocument, StorageError, StorageResult};
pub use store::Store;
