//! API Models

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use vpc_subnet::SubnetError;

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Build an error body from a code and message.
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl From<&SubnetError> for ErrorResponse {
    fn from(err: &SubnetError) -> Self {
        let code = match err {
            SubnetError::InvalidSplitCount { .. } => "invalid_split_count",
            SubnetError::InvalidZoneCount { .. } => "invalid_zone_count",
            SubnetError::BlockTooSmall { .. } => "block_too_small",
            SubnetError::Network(_) => "invalid_network",
        };
        Self::new(code, err.to_string())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}
