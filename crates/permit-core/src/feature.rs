//! # Feature Module
//!
//! Feature descriptors and module derivation.
//!
//! Features arrive from the platform's feature directory as a flat list.
//! Their names follow the convention `<MODULE>_<ACTION>[_suffix]`
//! (e.g. `CANDIDATE_LIST`, `POSITION_CREATE`); the module of a feature is
//! derived from its name, never stored.

use crate::Module;
use crate::{FeatureId, PermissionType};
use serde::{Deserialize, Serialize};

/// A backend-declared capability descriptor, the atomic unit of permission.
///
/// Read-only to the engine: features are fetched from the directory and
/// consumed as-is. The `method` verb is kept as the wire string and compared
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub name: String,
    pub method: String,
    pub active: bool,
}

impl Feature {
    /// Create a feature descriptor.
    #[must_use]
    pub fn new(
        id: FeatureId,
        name: impl Into<String>,
        method: impl Into<String>,
        active: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            method: method.into(),
            active,
        }
    }

    /// The module this feature belongs to, if its name carries one.
    #[must_use]
    pub fn module(&self) -> Option<Module> {
        derive_module(&self.name)
    }

    /// Case-insensitive comparison of the feature's HTTP verb.
    #[must_use]
    pub fn method_is(&self, verb: &str) -> bool {
        self.method.eq_ignore_ascii_case(verb)
    }

    /// Whether this feature counts toward the given permission category.
    ///
    /// Shorthand for [`PermissionType::matches`]; activity is not consulted
    /// here — callers filter inactive features first.
    #[must_use]
    pub fn grants(&self, permission: PermissionType) -> bool {
        permission.matches(self)
    }
}

/// Derive the module key from a feature name.
///
/// The module is the leading run of uppercase ASCII letters before the first
/// underscore: `CANDIDATE_LIST` → `CANDIDATE`, `USER_STATUS_UPDATE` → `USER`.
/// Returns `None` when the name has no underscore, the prefix is empty
/// (leading underscore), or the prefix contains anything other than
/// uppercase ASCII letters. Such features carry no module and are dropped
/// silently from grouping.
#[must_use]
pub fn derive_module(name: &str) -> Option<Module> {
    let prefix = &name[..name.find('_')?];
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    Some(Module::new(prefix))
}

// =============================================================================
// TESTS
// =============================================================================
