//! Error types for the HTTP layer.
//!
//! Every failure becomes a deterministic JSON rejection with a
//! human-readable `detail` field:
//!
//! - store errors (validation, unknown product, state conflicts) -> 400
//! - admin credential failures -> 403
//!
//! Unknown products are deliberately 400 rather than 404: the id arrives in
//! a request body, so the addressed resource exists and the input is what's
//! wrong.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use nutshop_core::StoreError;

/// API errors, each carrying the user-facing detail message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A store operation rejected the request.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Malformed or missing request input.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or incorrect admin credential.
    #[error("{0}")]
    Forbidden(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            // All store rejections are 400s: validation, unknown product,
            // empty cart and discount state conflicts alike
            ApiError::Store(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
