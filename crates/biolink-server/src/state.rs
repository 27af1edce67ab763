//! Shared handler state

use std::sync::Arc;

use biolink_core::Store;

use crate::error::ApiError;

/// State shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    store: Arc<Store>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Run a store operation on the blocking pool
    ///
    /// Document access is synchronous file I/O, so it is kept off the async
    /// worker threads.
    pub async fn run<T, E, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Store) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<ApiError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await?
            .map_err(Into::into)
    }
}
