//! JSON envelopes shared by every endpoint.
//!
//! Success payloads ride under `data`, failures under `error`. The error
//! code is the HTTP status, kept numeric in the type and rendered as a
//! string on the wire.

use serde::{Serialize, Serializer};

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn wrap(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error payload carried inside the error envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// HTTP status, stringified on the wire
    #[serde(serialize_with = "code_as_string")]
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error envelope: `{"success": false, "error": {...}}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ApiError,
}

impl ErrorResponse {
    /// Builds an error envelope without details.
    pub fn new(code: u16, message: String) -> Self {
        Self {
            success: false,
            error: ApiError {
                code,
                message,
                details: None,
            },
        }
    }

    /// Builds an error envelope carrying extra detail text.
    pub fn with_details(code: u16, message: String, details: String) -> Self {
        Self {
            success: false,
            error: ApiError {
                code,
                message,
                details: Some(details),
            },
        }
    }
}

fn code_as_string<S: Serializer>(code: &u16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(code)
}
