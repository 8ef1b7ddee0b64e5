//! Error types and their translation into responses.
//!
//! Every failure is classified once and translated in one place. HTML routes
//! call [`AppError::into_page`] for a themed page; form and JSON routes use
//! the [`IntoResponse`] impl, which answers with a JSON body. Server-side
//! failures are logged here and never echoed to the client.

use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::render::{self, PageRenderer};

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The requested event does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A required field is missing or the request could not be decoded.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The key-value store failed.
    #[error("storage error: {0}")]
    Storage(#[from] rsvp2go_core::Error),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "invalid_request",
            Self::Storage(_) => "storage_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Message safe to show to the client.
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::Validation(msg) => msg.clone(),
            Self::Storage(_) | Self::Internal(_) => {
                "An internal error occurred. Please try again later.".to_string()
            }
        }
    }

    fn log(&self) {
        match self {
            Self::Storage(err) => tracing::error!(error = %err, "storage error"),
            Self::Internal(err) => tracing::error!(error = %err, "internal server error"),
            Self::NotFound(msg) => tracing::debug!(%msg, "not found"),
            Self::Validation(msg) => tracing::debug!(%msg, "rejected request"),
        }
    }

    /// Render this error as a themed HTML page.
    pub fn into_page(self, renderer: &PageRenderer) -> Response {
        self.log();

        let fragment = match &self {
            Self::NotFound(_) => render::event::not_found(),
            Self::Validation(msg) => render::components::error_card("Invalid Request", msg),
            Self::Storage(_) | Self::Internal(_) => {
                render::components::error_card("Error", &self.public_message())
            }
        };

        (self.status(), renderer.render(fragment)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = ErrorResponse {
            error: self.kind(),
            message: self.public_message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Response for a handler that panicked.
pub fn panic_page(renderer: &PageRenderer, panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_page(renderer)
}
