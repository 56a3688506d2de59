//! Normalized client error

use crate::types::{ErrorBody, FieldError};

/// Fallback when neither the server nor the transport said anything useful
pub const GENERIC_ERROR: &str = "An error occurred";

/// Every failed call surfaces as one of these.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, `None` when no response was received
    pub status: Option<u16>,
    pub message: String,
    /// Field errors from a validation failure
    pub errors: Vec<FieldError>,
}

impl ApiError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            message: if message.trim().is_empty() {
                GENERIC_ERROR.to_string()
            } else {
                message
            },
            errors: Vec::new(),
        }
    }

    /// Build from an error response. The server's `message` wins, then the
    /// transport's description of the status.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) if !parsed.message.is_empty() => Self {
                status: Some(status),
                message: parsed.message,
                errors: parsed.errors,
            },
            _ => Self::new(
                Some(status),
                format!("Request failed with status code {}", status),
            ),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.status().map(|s| s.as_u16()), e.to_string())
    }
}
