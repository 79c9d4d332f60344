//! Standard response envelope returned by every endpoint.
//!
//! ```json
//! { "status": "success", "message": "search succeeded", "data": { "collegeId": 1 } }
//! { "status": "error", "message": "search failed", "data": null }
//! ```

use crate::error::AppError;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: Status,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            status: Status::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Failure envelope; never carries a payload.
    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            status: Status::Error,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// JSON body type every resource handler returns.
pub type Envelope<T> = Json<ApiResponse<T>>;

/// Wrap a service outcome into the envelope, collapsing any error into `failure`.
/// The error kind is logged; the caller only ever sees the fixed message.
pub fn respond<T>(
    outcome: Result<T, AppError>,
    success: &'static str,
    failure: &'static str,
) -> Envelope<T> {
    match outcome {
        Ok(data) => Json(ApiResponse::success(success, data)),
        Err(e) => {
            tracing::warn!(kind = e.kind(), error = %e, "{}", failure);
            Json(ApiResponse::error(failure))
        }
    }
}
