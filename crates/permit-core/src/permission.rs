//! # Permission Module
//!
//! The four CRUD permission categories and their classification rules.
//!
//! A feature is classified by heuristics over its HTTP verb and its name:
//!
//! | Category | Rule                                                    |
//! |----------|---------------------------------------------------------|
//! | READ     | method GET and name contains `_LIST` or `_VIEW`         |
//! | WRITE    | method POST and name contains `_CREATE`                 |
//! | UPDATE   | method PUT and name contains `_UPDATE`                  |
//! | DELETE   | method DELETE, or name contains `_DELETE` (any method)  |
//!
//! The DELETE rule's name branch is independent of the verb, so a feature
//! can classify into DELETE alongside its natural category. Downstream
//! collection deduplicates, so the overlap never reaches the submission
//! payload twice.

use crate::feature::Feature;
use serde::{Deserialize, Serialize};

/// Coarse-grained CRUD category assigned to features by method+name rules.
///
/// The variant order is the order cells appear in the console grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionType {
    Read,
    Write,
    Update,
    Delete,
}

impl PermissionType {
    /// All categories, in grid order.
    pub const ALL: [PermissionType; 4] = [
        PermissionType::Read,
        PermissionType::Write,
        PermissionType::Update,
        PermissionType::Delete,
    ];

    /// Canonical uppercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionType::Read => "READ",
            PermissionType::Write => "WRITE",
            PermissionType::Update => "UPDATE",
            PermissionType::Delete => "DELETE",
        }
    }

    /// Parse a category name, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str().eq_ignore_ascii_case(value))
    }

    /// Whether the feature satisfies this category's classification rule.
    ///
    /// Activity is not consulted: callers filter to active features before
    /// classifying.
    #[must_use]
    pub fn matches(self, feature: &Feature) -> bool {
        match self {
            PermissionType::Read => {
                feature.method_is("GET")
                    && (feature.name.contains("_LIST") || feature.name.contains("_VIEW"))
            }
            PermissionType::Write => {
                feature.method_is("POST") && feature.name.contains("_CREATE")
            }
            PermissionType::Update => {
                feature.method_is("PUT") && feature.name.contains("_UPDATE")
            }
            // The name branch applies regardless of the verb.
            PermissionType::Delete => {
                feature.method_is("DELETE") || feature.name.contains("_DELETE")
            }
        }
    }
}

impl std::fmt::Display for PermissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeatureId;

    fn feature(name: &str, method: &str) -> Feature {
        Feature::new(FeatureId(1), name, method, true)
    }

    #[test]
    fn read_requires_get_and_list_or_view() {
        assert!(PermissionType::Read.matches(&feature("CANDIDATE_LIST", "GET")));
        assert!(PermissionType::Read.matches(&feature("CANDIDATE_VIEW", "GET")));
        assert!(PermissionType::Read.matches(&feature("CANDIDATE_LIST", "get")));
        assert!(!PermissionType::Read.matches(&feature("CANDIDATE_LIST", "POST")));
        assert!(!PermissionType::Read.matches(&feature("CANDIDATE_EXPORT", "GET")));
    }

    #[test]
    fn write_requires_post_and_create() {
        assert!(PermissionType::Write.matches(&feature("COLLEGE_CREATE", "POST")));
        assert!(!PermissionType::Write.matches(&feature("COLLEGE_CREATE", "PUT")));
        assert!(!PermissionType::Write.matches(&feature("COLLEGE_IMPORT", "POST")));
    }

    #[test]
    fn update_requires_put_and_update() {
        assert!(PermissionType::Update.matches(&feature("USER_UPDATE", "PUT")));
        assert!(!PermissionType::Update.matches(&feature("USER_UPDATE", "POST")));
        assert!(!PermissionType::Update.matches(&feature("USER_PATCH", "PUT")));
    }

    #[test]
    fn delete_matches_verb_or_name() {
        assert!(PermissionType::Delete.matches(&feature("ROLE_REMOVE", "DELETE")));
        assert!(PermissionType::Delete.matches(&feature("ROLE_DELETE", "DELETE")));
        // Name branch fires even when the verb is not DELETE.
        assert!(PermissionType::Delete.matches(&feature("ROLE_DELETE", "POST")));
        assert!(!PermissionType::Delete.matches(&feature("ROLE_REMOVE", "POST")));
    }

    #[test]
    fn delete_name_branch_overlaps_natural_category() {
        // A POST feature whose name carries both _CREATE and _DELETE
        // classifies into WRITE and DELETE at once.
        let overlapping = feature("CANDIDATE_DELETE_REQUEST_CREATE", "POST");
        assert!(PermissionType::Write.matches(&overlapping));
        assert!(PermissionType::Delete.matches(&overlapping));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(PermissionType::parse("READ"), Some(PermissionType::Read));
        assert_eq!(PermissionType::parse("delete"), Some(PermissionType::Delete));
        assert_eq!(PermissionType::parse("EXECUTE"), None);
    }

    #[test]
    fn serializes_as_uppercase_names() {
        let json = serde_json::to_string(&PermissionType::Update).expect("serializable");
        assert_eq!(json, "\"UPDATE\"");
        let back: PermissionType = serde_json::from_str("\"DELETE\"").expect("parseable");
        assert_eq!(back, PermissionType::Delete);
    }
}
