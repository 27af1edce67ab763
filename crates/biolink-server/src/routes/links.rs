//! Link collection endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use biolink_core::{Ack, LinkItem, LinkPatch};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /links
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<LinkItem>>, ApiError> {
    let links = state.run(|store| store.links().list()).await?;
    Ok(Json(links))
}

/// POST /links
pub async fn create(
    State(state): State<AppState>,
    Json(item): Json<LinkItem>,
) -> Result<(StatusCode, Json<LinkItem>), ApiError> {
    let created = state.run(move |store| store.links().create(item)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /links
pub async fn replace_all(
    State(state): State<AppState>,
    Json(links): Json<Vec<LinkItem>>,
) -> Result<Json<Ack>, ApiError> {
    state
        .run(move |store| store.links().replace_all(links))
        .await?;
    Ok(Json(Ack::new("Links updated successfully")))
}

/// PUT /links/reorder
pub async fn reorder(
    State(state): State<AppState>,
    Json(links): Json<Vec<LinkItem>>,
) -> Result<Json<Ack>, ApiError> {
    state
        .run(move |store| store.links().replace_all(links))
        .await?;
    Ok(Json(Ack::new("Links reordered successfully")))
}

/// GET /links/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LinkItem>, ApiError> {
    let link = state.run(move |store| store.links().get(&id)).await?;
    Ok(Json(link))
}

/// PUT /links/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<LinkPatch>,
) -> Result<Json<LinkItem>, ApiError> {
    let updated = state
        .run(move |store| store.links().update_by_id(&id, &patch))
        .await?;
    Ok(Json(updated))
}

/// DELETE /links/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    state
        .run(move |store| store.links().delete_by_id(&id))
        .await?;
    Ok(Json(Ack::new("Link deleted")))
}
