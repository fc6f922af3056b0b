//! Integration tests for the console HTTP API.
//!
//! Runs the router against the in-memory backend with axum-test.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use axum_test::TestServer;
use permit::api::error::ErrorBody;
use permit::api::features::FeatureListResponse;
use permit::api::matrix::MatrixResponse;
use permit::api::roles::RoleCreateResponse;
use permit::api::{AppState, HealthResponse, router};
use permit::backend::InMemoryBackend;
use permit_core::{FeatureId, PermissionType, RoleId};
use serde_json::json;
use std::sync::Arc;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn server_with(backend: Arc<InMemoryBackend>) -> TestServer {
    let state = AppState {
        backend,
        api_key: None,
    };
    TestServer::new(router(state)).expect("router should build")
}

fn sample_server() -> (Arc<InMemoryBackend>, TestServer) {
    let backend = Arc::new(InMemoryBackend::sample());
    let server = server_with(backend.clone());
    (backend, server)
}

// =============================================================================
// HEALTH
// =============================================================================

#[tokio::test]
async fn health_reports_ok_and_version() {
    let (_backend, server) = sample_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: HealthResponse = response.json();
    assert_eq!(body.status, "ok");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// FEATURES
// =============================================================================

#[tokio::test]
async fn features_endpoint_passes_directory_through() {
    let (backend, server) = sample_server();

    let response = server.get("/v1/features").await;
    response.assert_status_ok();
    let body: FeatureListResponse = response.json();
    assert_eq!(body.items.len(), backend.features().len());
}

#[tokio::test]
async fn features_endpoint_filters_by_active_flag() {
    let (_backend, server) = sample_server();

    let all: FeatureListResponse = server.get("/v1/features").await.json();
    let active: FeatureListResponse = server
        .get("/v1/features")
        .add_query_param("active", "true")
        .await
        .json();

    assert!(active.items.len() < all.items.len());
    assert!(active.items.iter().all(|feature| feature.active));
}

// =============================================================================
// MATRIX
// =============================================================================

#[tokio::test]
async fn matrix_lists_visible_modules_in_order_with_counts() {
    let (_backend, server) = sample_server();

    let response = server.get("/v1/matrix").await;
    response.assert_status_ok();
    let body: MatrixResponse = response.json();

    let modules: Vec<&str> = body
        .modules
        .iter()
        .map(|row| row.module.as_str())
        .collect();
    assert_eq!(
        modules,
        vec!["CANDIDATE", "COLLEGE", "POSITION", "QUESTION", "ROLE", "USER"]
    );

    let candidate = &body.modules[0];
    let read = candidate
        .cells
        .iter()
        .find(|cell| cell.permission == PermissionType::Read)
        .unwrap();
    // CANDIDATE_LIST and CANDIDATE_VIEW both count toward READ.
    assert_eq!(read.available, 2);

    let role = body
        .modules
        .iter()
        .find(|row| row.module.as_str() == "ROLE")
        .unwrap();
    let update = role
        .cells
        .iter()
        .find(|cell| cell.permission == PermissionType::Update)
        .unwrap();
    // No ROLE_UPDATE feature exists; the cell is disabled.
    assert_eq!(update.available, 0);
}

// =============================================================================
// ROLE CREATION FLOW
// =============================================================================

#[tokio::test]
async fn create_role_assigns_selected_features() {
    let (backend, server) = sample_server();

    let response = server
        .post("/v1/roles")
        .json(&json!({
            "name": "  recruiting lead ",
            "selections": [
                {"module": "CANDIDATE", "permission": "READ"},
                {"module": "CANDIDATE", "permission": "WRITE"},
            ]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: RoleCreateResponse = response.json();
    assert_eq!(body.role.name, "RECRUITING LEAD");
    assert_eq!(body.assigned_features, 3);

    let roles = backend.roles().await;
    assert_eq!(roles.len(), 1);

    let assigned = backend.assigned(body.role.id).await.unwrap();
    // CANDIDATE_LIST, CANDIDATE_VIEW, CANDIDATE_CREATE — sorted, no dups.
    assert_eq!(assigned, vec![FeatureId(1), FeatureId(2), FeatureId(3)]);
}

#[tokio::test]
async fn repeated_selection_deselects_the_cell() {
    let (backend, server) = sample_server();

    let response = server
        .post("/v1/roles")
        .json(&json!({
            "name": "auditor",
            "selections": [
                {"module": "CANDIDATE", "permission": "READ"},
                {"module": "CANDIDATE", "permission": "READ"},
            ]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: RoleCreateResponse = response.json();
    assert_eq!(body.assigned_features, 0);
    // Assignment is skipped entirely for an empty payload.
    assert!(backend.assigned(body.role.id).await.is_none());
}

#[tokio::test]
async fn empty_role_name_is_rejected() {
    let (backend, server) = sample_server();

    let response = server
        .post("/v1/roles")
        .json(&json!({"name": "   ", "selections": []}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: ErrorBody = response.json();
    assert_eq!(body.code, "validation_error");
    assert!(backend.roles().await.is_empty());
}

#[tokio::test]
async fn hidden_module_selection_is_rejected() {
    let (backend, server) = sample_server();

    let response = server
        .post("/v1/roles")
        .json(&json!({
            "name": "reporter",
            "selections": [{"module": "REPORT", "permission": "READ"}]
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: ErrorBody = response.json();
    assert_eq!(body.code, "validation_error");
    assert!(backend.roles().await.is_empty());
}

#[tokio::test]
async fn duplicate_role_name_maps_to_conflict() {
    let (_backend, server) = sample_server();

    let request = json!({"name": "admin", "selections": []});
    server
        .post("/v1/roles")
        .json(&request)
        .await
        .assert_status(StatusCode::CREATED);

    // Same name, different case: the registry is case-insensitive.
    let response = server
        .post("/v1/roles")
        .json(&json!({"name": "Admin", "selections": []}))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let body: ErrorBody = response.json();
    assert_eq!(body.code, "already_exists");
}

#[tokio::test]
async fn creation_without_role_id_aborts_before_assignment() {
    let backend = Arc::new(InMemoryBackend::sample().with_omitted_role_ids());
    let server = server_with(backend.clone());

    let response = server
        .post("/v1/roles")
        .json(&json!({
            "name": "ghost",
            "selections": [{"module": "USER", "permission": "READ"}]
        }))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);

    let body: ErrorBody = response.json();
    assert_eq!(body.code, "missing_role_id");

    // The role exists upstream, but nothing was assigned to it.
    let roles = backend.roles().await;
    assert_eq!(roles.len(), 1);
    assert!(backend.assigned(roles[0].id).await.is_none());
}

#[tokio::test]
async fn assignment_failure_surfaces_the_created_role_id() {
    let backend = Arc::new(InMemoryBackend::sample().with_failing_assignments());
    let server = server_with(backend.clone());

    let response = server
        .post("/v1/roles")
        .json(&json!({
            "name": "half done",
            "selections": [{"module": "USER", "permission": "READ"}]
        }))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);

    let body: ErrorBody = response.json();
    assert_eq!(body.code, "assignment_failed");
    assert_eq!(body.role_id, Some(RoleId(1)));
    assert!(backend.assigned(RoleId(1)).await.is_none());
}

#[tokio::test]
async fn empty_directory_creates_a_permissionless_role() {
    let backend = Arc::new(InMemoryBackend::new(Vec::new()));
    let server = server_with(backend.clone());

    // Selections cannot resolve against an empty directory; each toggle is
    // a warning-level no-op and the role is created without permissions.
    let response = server
        .post("/v1/roles")
        .json(&json!({
            "name": "early bird",
            "selections": [{"module": "CANDIDATE", "permission": "READ"}]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: RoleCreateResponse = response.json();
    assert_eq!(body.assigned_features, 0);
    assert_eq!(backend.roles().await.len(), 1);
}

// =============================================================================
// API KEY GUARD
// =============================================================================

#[tokio::test]
async fn api_key_guard_protects_the_v1_surface() {
    let backend = Arc::new(InMemoryBackend::sample());
    let state = AppState {
        backend,
        api_key: Some("secret-key".into()),
    };
    let server = TestServer::new(router(state)).expect("router should build");

    // Health stays open.
    server.get("/health").await.assert_status_ok();

    server
        .get("/v1/matrix")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/v1/matrix")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer wrong"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/v1/matrix")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer secret-key"))
        .await
        .assert_status_ok();
}
