//! # Submission Module
//!
//! Reduction of a selection grid into the role-creation payload.
//!
//! The console creates the role first, then assigns the selected feature
//! IDs to it. This module owns the pure half of that flow: normalizing the
//! role name and flattening the matrix into a sorted, duplicate-free ID
//! list. The asynchronous calls live in the app layer.

use crate::matrix::PermissionMatrix;
use crate::{FeatureId, RoleId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A role as known to the platform's role registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

/// The payload handed to the backend: normalized name plus the feature IDs
/// to assign. `feature_ids` is sorted ascending and contains no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSubmission {
    pub name: String,
    pub feature_ids: Vec<FeatureId>,
}

/// Failures producing a submission from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The role name was empty after trimming.
    #[error("role name is empty")]
    EmptyRoleName,
}

/// Normalize a role name for submission: trim, then uppercase.
///
/// The registry treats names case-insensitively, so two names differing
/// only by case collapse to the same role; normalizing up front keeps the
/// console's dedupe semantics aligned with the registry's.
#[must_use]
pub fn normalize_role_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Build the submission payload for a named role from the current grid.
///
/// # Errors
///
/// Returns [`SubmissionError::EmptyRoleName`] when the name is empty after
/// trimming. An empty selection is not an error: the role is created
/// without permissions and the assignment call is skipped entirely.
pub fn build_submission(
    name: &str,
    matrix: &PermissionMatrix,
) -> Result<RoleSubmission, SubmissionError> {
    let name = normalize_role_name(name);
    if name.is_empty() {
        return Err(SubmissionError::EmptyRoleName);
    }
    let feature_ids = matrix.selected_feature_ids().into_iter().collect();
    Ok(RoleSubmission { name, feature_ids })
}

// =============================================================================
// TESTS
// =============================================================================
