//! Role creation endpoint.
//!
//! Owns the submission flow: resolve selections against the live feature
//! directory, create the role, then assign the collected feature IDs.
//! Assignment only runs when the payload is non-empty, and a creation
//! response without a role id aborts before any assignment is attempted.

use super::AppState;
use super::error::{
    ApiError, assignment_failed, conflict, missing_role_id, upstream_failed, validation_error,
};
use crate::backend::BackendError;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use permit_core::{
    Module, PermissionMatrix, PermissionType, Role, build_submission, is_allowed_module,
};
use serde::{Deserialize, Serialize};

/// One cell toggle, as the console sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    pub module: String,
    pub permission: PermissionType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleCreateRequest {
    pub name: String,
    /// Applied in order as cell toggles; repeating a pair deselects it.
    #[serde(default)]
    pub selections: Vec<Selection>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleCreateResponse {
    pub role: Role,
    pub assigned_features: usize,
}

/// `POST /v1/roles` — create a role and assign the selected features.
pub(crate) async fn create_role(
    State(state): State<AppState>,
    Json(body): Json<RoleCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let features = state
        .backend
        .list_features()
        .await
        .map_err(|err| upstream_failed("failed to list features", &err))?;

    let mut matrix = PermissionMatrix::initialize(&features);
    for selection in &body.selections {
        let module = Module::new(selection.module.trim().to_uppercase());
        // The console renders no control for hidden modules; reject rather
        // than silently materialize them.
        if !is_allowed_module(&module) {
            return Err(validation_error(format!(
                "module {module} is not selectable"
            )));
        }
        match matrix.toggle_cell(&module, selection.permission, &features) {
            Some(next) => matrix = next,
            None => {
                tracing::warn!(
                    module = %module,
                    permission = %selection.permission,
                    "feature directory is empty; selection ignored"
                );
            }
        }
    }

    let submission =
        build_submission(&body.name, &matrix).map_err(|err| validation_error(err.to_string()))?;

    let created = state
        .backend
        .create_role(&submission.name)
        .await
        .map_err(|err| match err {
            BackendError::Rejected { status: 409, .. } => {
                conflict(format!("role {} already exists", submission.name))
            }
            other => upstream_failed("failed to create role", &other),
        })?;

    let Some(role_id) = created.id else {
        tracing::error!(name = %submission.name, "role registry returned no role id");
        return Err(missing_role_id());
    };

    if !submission.feature_ids.is_empty() {
        if let Err(err) = state
            .backend
            .assign_features(role_id, &submission.feature_ids)
            .await
        {
            tracing::error!(
                error = %err,
                role_id = %role_id,
                "permission assignment failed after role creation"
            );
            return Err(assignment_failed(role_id));
        }
    }

    tracing::info!(
        role_id = %role_id,
        name = %submission.name,
        assigned = submission.feature_ids.len(),
        "role created"
    );

    Ok((
        StatusCode::CREATED,
        Json(RoleCreateResponse {
            role: Role {
                id: role_id,
                name: submission.name,
            },
            assigned_features: submission.feature_ids.len(),
        }),
    ))
}
