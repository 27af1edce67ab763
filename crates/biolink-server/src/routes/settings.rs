//! Settings endpoints

use axum::extract::State;
use axum::Json;

use biolink_core::{Ack, Settings};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /settings
pub async fn get(State(state): State<AppState>) -> Result<Json<Settings>, ApiError> {
    let settings = state
        .run(|store| {
            store
                .settings()
                .get()
                .map_err(|e| ApiError::storage("Failed to read settings", e))
        })
        .await?;
    Ok(Json(settings))
}

/// PUT /settings
pub async fn replace(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<Ack>, ApiError> {
    state
        .run(move |store| {
            store
                .settings()
                .replace(&settings)
                .map_err(|e| ApiError::storage("Failed to update settings", e))
        })
        .await?;
    Ok(Json(Ack::new("Settings updated successfully")))
}
