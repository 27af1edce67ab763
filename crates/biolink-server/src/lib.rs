//! Biolink server
//!
//! Serves the public landing page and the JSON API the admin client uses.
//! All state lives in the two documents managed by `biolink-core`; the
//! server holds no cache, so every request sees the current files.

pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

pub use error::ApiError;
pub use logging::init_logging;
pub use routes::router;
pub use state::AppState;

/// Serve the application on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Failed to read listener address")?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")
}
