//! Matrix overview endpoint.
//!
//! Serves the grid the console renders on the role-creation screen: the
//! visible modules in order, each with its four cells and the number of
//! features a cell would select. Selection state itself lives in the
//! console; this endpoint is derived purely from the feature directory.

use super::AppState;
use super::error::{ApiError, upstream_failed};
use axum::Json;
use axum::extract::State;
use permit_core::{Module, PermissionMatrix, PermissionType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CellView {
    pub permission: PermissionType,
    /// Features the cell would select; zero disables the control.
    pub available: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModuleRow {
    pub module: Module,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatrixResponse {
    pub modules: Vec<ModuleRow>,
}

/// `GET /v1/matrix` — the visible grid with per-cell availability.
pub(crate) async fn matrix_overview(
    State(state): State<AppState>,
) -> Result<Json<MatrixResponse>, ApiError> {
    let features = state
        .backend
        .list_features()
        .await
        .map_err(|err| upstream_failed("failed to list features", &err))?;

    let matrix = PermissionMatrix::initialize(&features);
    let modules = matrix
        .visible_modules()
        .map(|module| ModuleRow {
            module: module.clone(),
            cells: PermissionType::ALL
                .into_iter()
                .map(|permission| CellView {
                    permission,
                    available: PermissionMatrix::available_feature_count(
                        &features, module, permission,
                    ),
                })
                .collect(),
        })
        .collect();

    Ok(Json(MatrixResponse { modules }))
}
