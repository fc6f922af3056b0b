//! In-memory implementation of the platform backend.
//!
//! Exists for local development and tests: no external dependencies, all
//! state lost on restart. State lives behind `tokio::sync::RwLock` so the
//! backend can be shared across request handlers; reads are concurrent,
//! writes serialized.
//!
//! The failure toggles (`with_omitted_role_ids`, `with_failing_assignments`)
//! reproduce the two backend misbehaviors the submission flow must survive:
//! a creation response without an id, and an assignment that fails after
//! the role already exists.

use super::{Backend, BackendError, BackendResult, RoleCreated};
use async_trait::async_trait;
use permit_core::{Feature, FeatureId, Role, RoleId};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-memory feature directory plus role/permission registries.
#[derive(Debug)]
pub struct InMemoryBackend {
    features: Vec<Feature>,
    roles: RwLock<Vec<Role>>,
    assignments: RwLock<BTreeMap<RoleId, Vec<FeatureId>>>,
    next_role_id: RwLock<u64>,
    omit_role_ids: bool,
    fail_assignments: bool,
}

impl InMemoryBackend {
    /// Create a backend serving the given feature directory.
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            roles: RwLock::new(Vec::new()),
            assignments: RwLock::new(BTreeMap::new()),
            next_role_id: RwLock::new(1),
            omit_role_ids: false,
            fail_assignments: false,
        }
    }

    /// Backend seeded with a small recruitment-platform feature directory,
    /// used by `serve` when no backend URL is configured.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(sample_features())
    }

    /// Role creation succeeds but omits the role id from the response.
    #[must_use]
    pub fn with_omitted_role_ids(mut self) -> Self {
        self.omit_role_ids = true;
        self
    }

    /// Permission assignment always fails with a 503.
    #[must_use]
    pub fn with_failing_assignments(mut self) -> Self {
        self.fail_assignments = true;
        self
    }

    /// The feature directory this backend serves.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Roles created so far, in creation order.
    pub async fn roles(&self) -> Vec<Role> {
        self.roles.read().await.clone()
    }

    /// Feature IDs assigned to a role, if any assignment happened.
    pub async fn assigned(&self, role_id: RoleId) -> Option<Vec<FeatureId>> {
        self.assignments.read().await.get(&role_id).cloned()
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn list_features(&self) -> BackendResult<Vec<Feature>> {
        Ok(self.features.clone())
    }

    async fn create_role(&self, name: &str) -> BackendResult<RoleCreated> {
        let mut roles = self.roles.write().await;
        // The registry enforces case-insensitive name uniqueness.
        if roles
            .iter()
            .any(|role| role.name.eq_ignore_ascii_case(name))
        {
            return Err(BackendError::Rejected {
                status: 409,
                message: format!("role {name} already exists"),
            });
        }

        let mut next_id = self.next_role_id.write().await;
        let id = RoleId(*next_id);
        *next_id = next_id.saturating_add(1);

        roles.push(Role {
            id,
            name: name.to_string(),
        });

        Ok(RoleCreated {
            id: if self.omit_role_ids { None } else { Some(id) },
            name: name.to_string(),
        })
    }

    async fn assign_features(
        &self,
        role_id: RoleId,
        feature_ids: &[FeatureId],
    ) -> BackendResult<()> {
        if self.fail_assignments {
            return Err(BackendError::Rejected {
                status: 503,
                message: "permission registry unavailable".to_string(),
            });
        }
        let known = self
            .roles
            .read()
            .await
            .iter()
            .any(|role| role.id == role_id);
        if !known {
            return Err(BackendError::Rejected {
                status: 404,
                message: format!("role {role_id} not found"),
            });
        }
        self.assignments
            .write()
            .await
            .insert(role_id, feature_ids.to_vec());
        Ok(())
    }
}

/// A representative slice of the platform's feature directory.
#[must_use]
pub fn sample_features() -> Vec<Feature> {
    let mut id = 0u64;
    let mut next = |name: &str, method: &str, active: bool| {
        id += 1;
        Feature::new(FeatureId(id), name, method, active)
    };
    vec![
        next("CANDIDATE_LIST", "GET", true),
        next("CANDIDATE_VIEW", "GET", true),
        next("CANDIDATE_CREATE", "POST", true),
        next("CANDIDATE_UPDATE", "PUT", true),
        next("CANDIDATE_DELETE", "DELETE", true),
        next("COLLEGE_LIST", "GET", true),
        next("COLLEGE_CREATE", "POST", true),
        next("COLLEGE_UPDATE", "PUT", true),
        next("COLLEGE_DELETE", "DELETE", true),
        next("POSITION_LIST", "GET", true),
        next("POSITION_CREATE", "POST", true),
        next("POSITION_UPDATE", "PUT", true),
        next("POSITION_DELETE", "DELETE", true),
        next("QUESTION_LIST", "GET", true),
        next("QUESTION_CREATE", "POST", true),
        next("QUESTION_UPDATE", "PUT", true),
        next("QUESTION_DELETE", "DELETE", true),
        next("USER_LIST", "GET", true),
        next("USER_CREATE", "POST", true),
        next("USER_UPDATE", "PUT", true),
        next("USER_DELETE", "DELETE", true),
        next("ROLE_LIST", "GET", true),
        next("ROLE_CREATE", "POST", true),
        // Derived but hidden from the console grid.
        next("REPORT_EXPORT", "GET", true),
        // Retired feature, excluded from the matrix entirely.
        next("CANDIDATE_IMPORT_CREATE", "POST", false),
        // Irregular name, carries no module.
        next("healthcheck", "GET", true),
    ]
}
