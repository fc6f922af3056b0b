//! # Backend Module
//!
//! The seam between the console and the platform backend.
//!
//! Three collaborator contracts hide behind one trait:
//! - the **feature directory**, which lists every declared feature;
//! - the **role registry**, which creates named roles;
//! - the **permission registry**, which assigns feature IDs to a role.
//!
//! [`HttpBackend`] talks to the real platform over REST; [`InMemoryBackend`]
//! backs tests and local development.

use async_trait::async_trait;
use permit_core::{Feature, FeatureId, RoleId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod http;
mod memory;

pub use http::HttpBackend;
pub use memory::InMemoryBackend;

/// Failures talking to the platform backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (connect, timeout, malformed body).
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

pub type BackendResult<T> = Result<T, BackendError>;

/// The role registry's answer to a creation request.
///
/// `id` is optional because the wire contract does not guarantee one; the
/// submission flow treats a missing id as fatal, since assignment cannot
/// proceed without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCreated {
    pub id: Option<RoleId>,
    pub name: String,
}

/// The platform backend as the console sees it.
#[async_trait]
pub trait Backend: Send + Sync {
    /// List every declared feature, regardless of active flag.
    /// Filtering to active features is the engine's job.
    async fn list_features(&self) -> BackendResult<Vec<Feature>>;

    /// Create a role with an already-normalized name.
    async fn create_role(&self, name: &str) -> BackendResult<RoleCreated>;

    /// Assign feature IDs to a role. Callers pass a non-empty,
    /// duplicate-free list.
    async fn assign_features(
        &self,
        role_id: RoleId,
        feature_ids: &[FeatureId],
    ) -> BackendResult<()>;
}
