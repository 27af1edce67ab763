//! Public landing page

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};

use biolink_core::{PublicPage, PLACEHOLDER_SVG};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
///
/// Both documents are read on every request; the response is never cached.
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let html = state
        .run(|store| {
            let settings = store
                .settings()
                .get()
                .map_err(|e| ApiError::storage("Failed to read settings", e))?;
            let links = store.links().list()?;
            Ok::<_, ApiError>(PublicPage::new(&settings, &links).to_html())
        })
        .await?;

    Ok(([(header::CACHE_CONTROL, "no-store")], Html(html)))
}

/// GET /placeholder.svg
pub async fn placeholder() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], PLACEHOLDER_SVG)
}
