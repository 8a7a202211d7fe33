//! Response types for the on-call report API.
//!
//! This module defines the error response structures and maps
//! [`ReportError`]s onto HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ReportError> for ApiErrorResponse {
    fn from(error: ReportError) -> Self {
        let message = error.to_string();
        let (status, code, details) = match &error {
            ReportError::ConfigNotFound { .. } | ReportError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "The server configuration could not be loaded",
            ),
            ReportError::InvalidTimezone { .. } => (
                StatusCode::BAD_REQUEST,
                "INVALID_TIMEZONE",
                "The schedule timezone is not a known IANA identifier",
            ),
            ReportError::InvalidDate { .. } => (
                StatusCode::BAD_REQUEST,
                "INVALID_DATE",
                "Dates must be formatted as YYYY-MM-DD",
            ),
            ReportError::MultipleRecipients { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MULTIPLE_RECIPIENTS",
                "Periods with more than one simultaneous recipient cannot be attributed",
            ),
            ReportError::MissingRecipient { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_RECIPIENT",
                "Every period needs exactly one recipient",
            ),
            ReportError::InvalidPeriod { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_PERIOD",
                "The period bounds are inconsistent",
            ),
            ReportError::MalformedResponse { .. } => (
                StatusCode::BAD_REQUEST,
                "MALFORMED_TIMELINE",
                "The timeline payload could not be decoded",
            ),
            ReportError::Transport { .. } => (
                StatusCode::BAD_GATEWAY,
                "TRANSPORT_ERROR",
                "The schedule service could not be reached",
            ),
        };

        ApiErrorResponse {
            status,
            error: ApiError::with_details(code, message, details),
        }
    }
}
