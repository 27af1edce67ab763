//! HTTP routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | public page |
//! | GET | `/placeholder.svg` | placeholder profile image |
//! | GET, POST, PUT | `/links` | list, create, replace all |
//! | PUT | `/links/reorder` | replace all |
//! | GET, PUT, DELETE | `/links/{id}` | get, update, delete |
//! | GET, PUT | `/settings` | get, replace |

mod links;
mod public;
mod settings;

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, put};
use axum::Router;
use tracing::info;

use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(public::index))
        .route("/placeholder.svg", get(public::placeholder))
        .route(
            "/links",
            get(links::list).post(links::create).put(links::replace_all),
        )
        .route("/links/reorder", put(links::reorder))
        .route(
            "/links/{id}",
            get(links::get).put(links::update).delete(links::delete),
        )
        .route("/settings", get(settings::get).put(settings::replace))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Log method, path, status and latency for every request
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} -> {} ({} ms)",
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}
