//! HTTP client for the platform backend.
//!
//! Thin REST mapping, nothing more: each method hits one endpoint, checks
//! the status, and decodes the body. Non-success statuses become
//! [`BackendError::Rejected`] carrying the response text.

use super::{Backend, BackendError, BackendResult, RoleCreated};
use async_trait::async_trait;
use permit_core::{Feature, FeatureId, RoleId};
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct RoleCreateBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct AssignBody<'a> {
    feature_ids: &'a [FeatureId],
}

/// REST client for the feature directory and role/permission registries.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a client for the given base URL with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the underlying client fails to
    /// build.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> BackendResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { base_url, client })
    }

    async fn check(response: reqwest::Response) -> BackendResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_features(&self) -> BackendResult<Vec<Feature>> {
        let url = format!("{}/features", self.base_url);
        let response = self.client.get(&url).send().await?;
        let features = Self::check(response).await?.json().await?;
        Ok(features)
    }

    async fn create_role(&self, name: &str) -> BackendResult<RoleCreated> {
        let url = format!("{}/roles", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&RoleCreateBody { name })
            .send()
            .await?;
        let created = Self::check(response).await?.json().await?;
        Ok(created)
    }

    async fn assign_features(
        &self,
        role_id: RoleId,
        feature_ids: &[FeatureId],
    ) -> BackendResult<()> {
        let url = format!("{}/roles/{}/permissions", self.base_url, role_id);
        let response = self
            .client
            .post(&url)
            .json(&AssignBody { feature_ids })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
