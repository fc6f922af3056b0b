//! Feature directory endpoint.

use super::AppState;
use super::error::{ApiError, upstream_failed};
use axum::Json;
use axum::extract::{Query, State};
use permit_core::Feature;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FeatureQuery {
    /// When set, only features with a matching active flag are returned.
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeatureListResponse {
    pub items: Vec<Feature>,
}

/// `GET /v1/features` — pass the directory through, optionally filtered.
pub(crate) async fn list_features(
    State(state): State<AppState>,
    Query(query): Query<FeatureQuery>,
) -> Result<Json<FeatureListResponse>, ApiError> {
    let mut items = state
        .backend
        .list_features()
        .await
        .map_err(|err| upstream_failed("failed to list features", &err))?;

    if let Some(active) = query.active {
        items.retain(|feature| feature.active == active);
    }

    Ok(Json(FeatureListResponse { items }))
}
