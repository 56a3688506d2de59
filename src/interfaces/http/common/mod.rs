//! Shared HTTP building blocks: error responses and request extractors

pub mod error;
pub mod extract;
pub mod validated_json;

pub use error::{ApiError, ErrorBody};
pub use extract::{JsonBody, QueryParams};
pub use validated_json::ValidatedJson;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of responses that only carry a status message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
