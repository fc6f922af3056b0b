//! # API Module
//!
//! Axum wiring for the console's HTTP surface.
//!
//! Routes:
//! - `GET /health` — liveness, unauthenticated
//! - `GET /v1/features` — the feature directory, optionally filtered
//! - `GET /v1/matrix` — the visible module × permission grid with counts
//! - `POST /v1/roles` — the role-creation flow
//!
//! The `/v1` surface sits behind an optional bearer API key compared in
//! constant time; request tracing and permissive CORS apply to everything.

use crate::backend::Backend;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod features;
pub mod matrix;
pub mod roles;

use error::{ApiError, unauthorized};

/// Shared state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    /// Bearer key required on the `/v1` surface; `None` disables the guard.
    pub api_key: Option<Arc<str>>,
}

/// Build the console router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/features", get(features::list_features))
        .route("/v1/matrix", get(matrix::matrix_overview))
        .route("/v1/roles", post(roles::create_role))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Bearer API-key guard for the `/v1` surface.
///
/// Comparison is constant-time to keep key probing timing-neutral. With no
/// key configured the guard passes everything through.
async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match provided {
        Some(key) if bool::from(key.as_bytes().ct_eq(expected.as_bytes())) => {
            Ok(next.run(request).await)
        }
        _ => Err(unauthorized("missing or invalid api key")),
    }
}
