use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use validator::ValidationErrors;

use crate::product_actor::ProductError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] so every failure renders as
/// `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No product with the requested id.
    #[error("Product not found")]
    NotFound,

    /// Request body failed field validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Body could not be read as the expected JSON shape.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Error surfaced by the catalog client.
    #[error(transparent)]
    Product(#[from] ProductError),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Product not found", "code": "NOT_FOUND" }),
            ),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_ERROR",
                    "fields": field_messages(errors),
                }),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "code": "BAD_REQUEST" }),
            ),
            ApiError::Product(ProductError::ValidationError(msg)) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "code": "VALIDATION_ERROR" }),
            ),
            ApiError::Product(ProductError::ActorCommunicationError(msg)) => {
                tracing::error!(error = %msg, "Catalog store unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error", "code": "INTERNAL_ERROR" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Flattens validator output into `{ field: [message, ...] }`.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
