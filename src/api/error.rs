//! API error handling for consistent JSON error envelopes.

use super::envelope;
use crate::meeting::ParseError;
use crate::qa::QaError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

/// API error type that converts to a failure envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    kind: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, kind: &'static str) -> Self {
        Self {
            status,
            message: message.into(),
            kind,
        }
    }

    pub fn internal(message: impl Into<String>, kind: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, kind)
    }

    /// Required request field absent.
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "MissingField")
    }

    /// Request body or query string could not be decoded.
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::internal(message, "InvalidBody")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(
            "Request failed with {} ({}): {}",
            self.status, self.kind, self.message
        );
        let body = Json(envelope::failure(&self.message, self.kind));
        (self.status, body).into_response()
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        Self::internal(err.to_string(), err.kind())
    }
}

impl From<QaError> for ApiError {
    fn from(err: QaError) -> Self {
        Self::internal(err.to_string(), err.kind())
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
