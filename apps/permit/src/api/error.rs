//! API error types and helpers.
//!
//! Centralizes HTTP error construction so every endpoint returns the same
//! `{code, message}` shape. Internal details are logged server-side; the
//! client sees a stable code and a short message.

use crate::backend::BackendError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use permit_core::RoleId;
use serde::{Deserialize, Serialize};

/// JSON body of every error response.
///
/// `role_id` is set only on the partial-failure path: the role was created
/// but permission assignment failed, and the id lets an operator repair the
/// inconsistency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,
}

/// Structured API error returned by handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.to_string(),
                message: message.into(),
                role_id: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// 400 Bad Request for invalid client input.
pub fn validation_error(message: impl Into<String>) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "validation_error", message)
}

/// 401 Unauthorized for a missing or wrong API key.
pub fn unauthorized(message: impl Into<String>) -> ApiError {
    ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

/// 409 Conflict, passed through from the registry.
pub fn conflict(message: impl Into<String>) -> ApiError {
    ApiError::new(StatusCode::CONFLICT, "already_exists", message)
}

/// 502 Bad Gateway for a backend failure, logged server-side.
pub fn upstream_failed(context: &str, err: &BackendError) -> ApiError {
    tracing::error!(error = %err, context, "platform backend call failed");
    ApiError::new(StatusCode::BAD_GATEWAY, "upstream_failed", context)
}

/// 502 for a creation response that carried no role id.
///
/// Fatal for the submission flow: assignment cannot proceed without an id,
/// and nothing has been assigned yet.
pub fn missing_role_id() -> ApiError {
    ApiError::new(
        StatusCode::BAD_GATEWAY,
        "missing_role_id",
        "role registry returned no role id; permissions were not assigned",
    )
}

/// 502 for the partial-failure path: the role exists, assignment failed.
///
/// No automatic rollback; the body carries the created role id.
pub fn assignment_failed(role_id: RoleId) -> ApiError {
    ApiError {
        status: StatusCode::BAD_GATEWAY,
        body: ErrorBody {
            code: "assignment_failed".to_string(),
            message: format!(
                "role {role_id} was created but permission assignment failed; \
                 the role currently has no permissions"
            ),
            role_id: Some(role_id),
        },
    }
}

// =============================================================================
// TESTS
// =============================================================================
