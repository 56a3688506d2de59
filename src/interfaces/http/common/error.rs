//! API error type and its JSON representation

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DomainError, FieldError};

/// Error body: `{message}` plus a field list for validation failures
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                errors: Vec::new(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                message: "Validation failed".to_string(),
                errors,
            },
        }
    }

    /// Map a domain error. Storage failures are logged and reported with
    /// `server_message` only.
    pub fn from_domain(err: DomainError, server_message: &str) -> Self {
        match err {
            DomainError::Validation(errors) => Self::validation(errors),
            DomainError::InvalidId { entity, .. } => {
                Self::bad_request(format!("Invalid {} ID", entity_label(entity)))
            }
            DomainError::NotFound { entity, .. } => Self::new(
                StatusCode::NOT_FOUND,
                capitalize(&format!("{} not found", entity_label(entity))),
            ),
            DomainError::Forbidden(message) => Self::new(StatusCode::FORBIDDEN, message),
            DomainError::Unauthorized(message) => Self::unauthorized(message),
            DomainError::InvalidCredentials => Self::bad_request("Invalid credentials"),
            DomainError::Conflict(message) => Self::new(StatusCode::CONFLICT, message),
            DomainError::Storage(detail) => {
                error!(error = %detail, "{}", server_message);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, server_message)
            }
        }
    }
}

fn entity_label(entity: &str) -> &str {
    match entity {
        "ChargingStation" => "charging station",
        "User" => "user",
        other => other,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_domain(err, "Server error")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(format!("Invalid query parameters: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (
                DomainError::Validation(vec![FieldError::new("name", "Name is required")]),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::InvalidId {
                    entity: "ChargingStation",
                    value: "x".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::NotFound {
                    entity: "ChargingStation",
                    field: "id",
                    value: "x".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (DomainError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (DomainError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (DomainError::Conflict("dup".into()), StatusCode::CONFLICT),
            (DomainError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn messages_name_the_entity() {
        let invalid = ApiError::from(DomainError::InvalidId {
            entity: "ChargingStation",
            value: "x".into(),
        });
        assert_eq!(invalid.body.message, "Invalid charging station ID");

        let missing = ApiError::from(DomainError::NotFound {
            entity: "ChargingStation",
            field: "id",
            value: "x".into(),
        });
        assert_eq!(missing.body.message, "Charging station not found");
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let err = ApiError::from_domain(
            DomainError::Storage("UNIQUE constraint failed: secret_table".into()),
            "Server error creating charging station",
        );
        assert_eq!(err.body.message, "Server error creating charging station");
        assert!(err.body.errors.is_empty());
    }
}
