//! Error types for metgal-web
//!
//! Handlers return [`ApiError`]; any error that reaches the response is a
//! generic plain-text 500. Route misses are not errors here, they are served
//! by the 404 page.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::CollectionError;

/// Body of every 500 response
pub const INTERNAL_ERROR_BODY: &str = "Error al procesar la solicitud.";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Collection API call that the page cannot do without
    #[error("Upstream error: {0}")]
    Upstream(#[from] CollectionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Error processing request");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            INTERNAL_ERROR_BODY,
        )
            .into_response()
    }
}

/// Convenience Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
