//! Errors a handler can return, and how each one reaches the client.

use crate::transport::http::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub const MSG_NOT_FOUND: &str = "Producto no encontrado";
pub const MSG_MALFORMED_BODY: &str = "JSON no valido";
pub const MSG_INTERNAL: &str = "Error interno del servidor";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Producto no encontrado")]
    NotFound,

    #[error("JSON no valido: {0}")]
    MalformedBody(String),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, MSG_NOT_FOUND),
            ApiError::MalformedBody(detail) => {
                tracing::debug!(%detail, "Rejected request body");
                (StatusCode::BAD_REQUEST, MSG_MALFORMED_BODY)
            }
            ApiError::Store(e) => {
                tracing::error!(error = %e, "Store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
            }
        };
        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
