use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A single failing input field, reported back to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `location.latitude`
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Invalid {entity} ID: {value}")]
    InvalidId { entity: &'static str, value: String },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
