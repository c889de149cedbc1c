//! API error handling for the position sizer.
//!
//! Errors carry a stable code, a human-readable message and key/value
//! context, and render as a JSON body with a matching HTTP status.
//!
//! # HTTP Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `INVALID_REQUEST` | 400 | Malformed JSON or unknown fields |
//! | `INVALID_INPUT` | 400 | Trade input rejected by the engine |
//! | `METRICS_DISABLED` | 404 | `/metrics` requested with metrics off |
//! | `INTERNAL_ERROR` | 500 | Unexpected server error |

use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sizing::SizingError;

/// Error codes for the position sizer API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invalid request format or missing fields.
    InvalidRequest,
    /// Trade input failed validation.
    InvalidInput,
    /// Metrics endpoint is disabled.
    MetricsDisabled,
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::MetricsDisabled => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidInput => "INVALID_INPUT",
            Self::MetricsDisabled => "METRICS_DISABLED",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// An API error with context.
#[derive(Debug, Error)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl ApiError {
    /// Create a new API error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Convert to the JSON error body.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            status: self.code.http_status().as_u16(),
            details: self.context.iter().cloned().collect(),
        }
    }

    /// Invalid request format.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Metrics endpoint disabled.
    #[must_use]
    pub fn metrics_disabled() -> Self {
        Self::new(ErrorCode::MetricsDisabled, "Metrics are disabled")
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

impl From<SizingError> for ApiError {
    fn from(err: SizingError) -> Self {
        Self::new(ErrorCode::InvalidInput, err.to_string()).with_context("field", err.field())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.http_status(), Json(self.to_http_response())).into_response()
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// Additional details.
    pub details: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidRequest.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidInput.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::MetricsDisabled.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_creation() {
        let error = ApiError::new(ErrorCode::InvalidRequest, "Bad request")
            .with_context("field", "entryPrice")
            .with_context("value", "abc");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Bad request");
        assert_eq!(error.context().len(), 2);
    }

    #[test]
    fn test_from_sizing_error() {
        let error = ApiError::from(SizingError::invalid("stopExitPrice", "zero loss"));
        let response = error.to_http_response();

        assert_eq!(response.code, "INVALID_INPUT");
        assert_eq!(response.status, 400);
        assert_eq!(
            response.details.get("field").map(String::as_str),
            Some("stopExitPrice")
        );
    }

    #[test]
    fn test_error_display() {
        let error = ApiError::invalid_request("Missing field");
        assert_eq!(error.to_string(), "[INVALID_REQUEST] Missing field");
    }
}
