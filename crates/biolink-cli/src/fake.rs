//! In-process [`AdminApi`] for tests
//!
//! Backed by an in-memory `Store`, so link semantics match the server.
//! Every call is recorded, and the fake can be switched into a failing mode.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use biolink_core::{Ack, LinkError, LinkItem, LinkPatch, Settings, Store};

use crate::api::{AdminApi, ClientError, ClientResult};

pub struct FakeApi {
    store: Store,
    calls: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl FakeApi {
    pub fn new(links: Vec<LinkItem>, settings: Settings) -> Self {
        Self {
            store: Store::in_memory(links, settings),
            calls: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Links held "server side"
    pub fn links(&self) -> Vec<LinkItem> {
        self.store.links().list().unwrap()
    }

    pub fn settings(&self) -> Settings {
        self.store.settings().get().unwrap()
    }

    /// Calls made so far, e.g. `"PUT /links/1"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than reads
    pub fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("GET"))
            .collect()
    }

    /// Make every following call fail with a 500
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn record(&self, call: String) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: 500,
                message: "Internal server error".to_string(),
            });
        }
        Ok(())
    }
}

fn to_client_error(err: LinkError) -> ClientError {
    let (status, message) = match err {
        LinkError::NotFound { .. } => (404, "Link not found".to_string()),
        LinkError::DuplicateId { .. } => (409, err.to_string()),
        LinkError::Validation(_) => (400, err.to_string()),
        LinkError::Storage(_) => (500, "Failed to access links".to_string()),
    };
    ClientError::Status { status, message }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn list_links(&self) -> ClientResult<Vec<LinkItem>> {
        self.record("GET /links".to_string())?;
        self.store.links().list().map_err(to_client_error)
    }

    async fn get_link(&self, id: &str) -> ClientResult<LinkItem> {
        self.record(format!("GET /links/{}", id))?;
        self.store.links().get(id).map_err(to_client_error)
    }

    async fn create_link(&self, link: &LinkItem) -> ClientResult<LinkItem> {
        self.record("POST /links".to_string())?;
        self.store
            .links()
            .create(link.clone())
            .map_err(to_client_error)
    }

    async fn update_link(&self, id: &str, patch: &LinkPatch) -> ClientResult<LinkItem> {
        self.record(format!("PUT /links/{}", id))?;
        self.store
            .links()
            .update_by_id(id, patch)
            .map_err(to_client_error)
    }

    async fn delete_link(&self, id: &str) -> ClientResult<Ack> {
        self.record(format!("DELETE /links/{}", id))?;
        self.store
            .links()
            .delete_by_id(id)
            .map_err(to_client_error)?;
        Ok(Ack::new("Link deleted"))
    }

    async fn replace_links(&self, links: &[LinkItem]) -> ClientResult<Ack> {
        self.record("PUT /links".to_string())?;
        self.store
            .links()
            .replace_all(links.to_vec())
            .map_err(to_client_error)?;
        Ok(Ack::new("Links updated successfully"))
    }

    async fn get_settings(&self) -> ClientResult<Settings> {
        self.record("GET /settings".to_string())?;
        self.store
            .settings()
            .get()
            .map_err(|_| ClientError::Status {
                status: 500,
                message: "Failed to read settings".to_string(),
            })
    }

    async fn replace_settings(&self, settings: &Settings) -> ClientResult<Ack> {
        self.record("PUT /settings".to_string())?;
        self.store
            .settings()
            .replace(settings)
            .map_err(|_| ClientError::Status {
                status: 500,
                message: "Failed to update settings".to_string(),
            })?;
        Ok(Ack::new("Settings updated successfully"))
    }
}

pub fn sample_links() -> Vec<LinkItem> {
    vec![
        LinkItem::with_id("1", "A", "https://a.example"),
        LinkItem::with_id("2", "B", "https://b.example"),
        LinkItem::with_id("3", "C", "https://c.example"),
    ]
}
