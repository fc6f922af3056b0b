//! # Permit Core
//!
//! The deterministic permission-matrix engine for the Permit console.
//!
//! This crate owns THE LOGIC and nothing else:
//! - Feature descriptors and module derivation ([`feature`])
//! - The four CRUD permission categories and their classification rules
//!   ([`permission`])
//! - The module × permission selection grid ([`matrix`])
//! - Reduction of the grid into a role submission payload ([`submission`])
//!
//! All data structures use `BTreeMap`/`BTreeSet` for deterministic ordering.
//! There is no I/O, no async, and no shared mutable state: every operation
//! is a pure transformation over values owned by the caller, so the engine
//! can be re-run at any time (re-initialization always yields a fresh,
//! all-empty matrix).

use serde::{Deserialize, Serialize};

pub mod feature;
pub mod matrix;
pub mod permission;
pub mod submission;

pub use feature::{Feature, derive_module};
pub use matrix::{ALLOWED_MODULES, PermissionMatrix, is_allowed_module};
pub use permission::PermissionType;
pub use submission::{
    Role, RoleSubmission, SubmissionError, build_submission, normalize_role_name,
};

// =============================================================================
// IDENTIFIER NEWTYPES
// =============================================================================

/// Opaque identifier of a backend-declared feature.
///
/// Features are the atomic unit of permission; their identifiers are unique
/// and assigned by the platform backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FeatureId(pub u64);

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a role in the platform's role registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoleId(pub u64);

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A logical grouping of features, derived from a shared name prefix
/// (e.g. `CANDIDATE`, `ROLE`).
///
/// Modules are never declared by the backend; they exist only as derived
/// keys, produced by [`derive_module`]. Ordering is lexicographic, which is
/// also the order the console presents modules in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Module(String);

impl Module {
    /// Create a module key from its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The module name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
