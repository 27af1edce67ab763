//! HTTP error mapping
//!
//! Every service error is caught at the handler boundary and turned into a
//! status code plus a `{"error": "..."}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use biolink_core::{LinkError, StorageError};

/// Errors returned from request handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// No link with the requested id
    #[error("Link not found: {0}")]
    NotFound(String),

    /// A link with this id already exists
    #[error("A link with id '{0}' already exists")]
    Conflict(String),

    /// The request body failed validation
    #[error("{0}")]
    BadRequest(String),

    /// A document could not be read or written
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: StorageError,
    },

    /// The blocking storage task panicked or was cancelled
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// Wrap a storage failure with the message shown to clients
    pub fn storage(message: &'static str, source: StorageError) -> Self {
        ApiError::Storage { message, source }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage { .. } | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body
    ///
    /// Server errors only expose their summary; paths and I/O details stay in
    /// the log.
    fn public_message(&self) -> String {
        match self {
            ApiError::NotFound(_) => "Link not found".to_string(),
            ApiError::Storage { message, .. } => (*message).to_string(),
            ApiError::Task(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Operator hint for storage failures, logged next to the error
    fn hint(&self) -> Option<&'static str> {
        match self {
            ApiError::Storage { source, .. } => source.recovery_suggestion(),
            _ => None,
        }
    }
}

impl From<LinkError> for ApiError {
    fn from(err: LinkError) -> Self {
        match err {
            LinkError::NotFound { id } => ApiError::NotFound(id),
            LinkError::DuplicateId { id } => ApiError::Conflict(id),
            LinkError::Validation(msg) => ApiError::BadRequest(msg),
            LinkError::Storage(source) => ApiError::storage("Failed to access links", source),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match self.hint() {
                Some(hint) => error!("{} ({})", self, hint),
                None => error!("{}", self),
            }
        } else {
            warn!("{}", self);
        }

        let body = Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}
