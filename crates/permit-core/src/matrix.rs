//! # Permission Matrix
//!
//! The module × permission selection grid behind the role-creation screen.
//!
//! The matrix maps each derived module to four cells, one per
//! [`PermissionType`], and each cell holds the set of feature IDs currently
//! selected. Selection is all-or-nothing per cell: a cell is either empty or
//! holds exactly the full eligible set for its (module, permission) pair at
//! the time it was toggled on. There is no per-feature selection state.
//!
//! All storage is `BTreeMap`/`BTreeSet`, so module order, cell order, and
//! the collected payload are deterministic.

use crate::feature::Feature;
use crate::permission::PermissionType;
use crate::{FeatureId, Module};
use std::collections::{BTreeMap, BTreeSet};

/// Modules the console surfaces. Derived modules outside this list exist in
/// the matrix but are never rendered, so they can never be toggled.
pub const ALLOWED_MODULES: [&str; 6] = [
    "CANDIDATE",
    "COLLEGE",
    "POSITION",
    "QUESTION",
    "ROLE",
    "USER",
];

/// Whether a module is on the console's visibility allow-list.
#[must_use]
pub fn is_allowed_module(module: &Module) -> bool {
    ALLOWED_MODULES.contains(&module.as_str())
}

type Row = BTreeMap<PermissionType, BTreeSet<FeatureId>>;

/// The full module × permission grid of current selections.
///
/// Owned exclusively by the calling screen between interactions; every
/// mutation returns a new value, so callers can detect change by comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix {
    cells: BTreeMap<Module, Row>,
}

impl PermissionMatrix {
    /// Build the initial, all-empty matrix from the feature directory.
    ///
    /// Entries are created for every allow-listed module and for every
    /// distinct module derived from an active feature; features whose name
    /// carries no module are ignored for grouping. Every entry starts with
    /// four empty cells — selection never pre-populates from an existing
    /// role, so re-initialization discards any prior selections.
    #[must_use]
    pub fn initialize(features: &[Feature]) -> Self {
        let mut cells = BTreeMap::new();
        for name in ALLOWED_MODULES {
            cells.insert(Module::new(name), Self::empty_row());
        }
        for feature in features.iter().filter(|feature| feature.active) {
            if let Some(module) = feature.module() {
                cells.entry(module).or_insert_with(Self::empty_row);
            }
        }
        Self { cells }
    }

    fn empty_row() -> Row {
        PermissionType::ALL
            .into_iter()
            .map(|permission| (permission, BTreeSet::new()))
            .collect()
    }

    /// Toggle one cell, returning the new matrix.
    ///
    /// Returns `None` when `features` is empty: the feature directory has
    /// not loaded yet, the toggle is a recoverable no-op, and the caller
    /// surfaces it at warning level. Otherwise the result differs from
    /// `self` in exactly one cell:
    /// - a non-empty cell is cleared ("deselect all");
    /// - an empty cell is set to the full eligible set for the pair —
    ///   every active feature of the module satisfying the permission rule
    ///   ("select all").
    ///
    /// A module not present in the matrix is materialized on demand with
    /// four empty cells, so toggles are always safe once a module key is
    /// known to the caller.
    #[must_use]
    pub fn toggle_cell(
        &self,
        module: &Module,
        permission: PermissionType,
        features: &[Feature],
    ) -> Option<Self> {
        if features.is_empty() {
            return None;
        }
        let mut next = self.clone();
        let row = next
            .cells
            .entry(module.clone())
            .or_insert_with(Self::empty_row);
        let cell = row.entry(permission).or_default();
        if cell.is_empty() {
            *cell = eligible(features, module, permission)
                .map(|feature| feature.id)
                .collect();
        } else {
            cell.clear();
        }
        Some(next)
    }

    /// Count the active features a cell would select.
    ///
    /// Pure query over the feature list; does not consult selection state.
    /// A zero count means the cell's control is disabled — toggling it can
    /// only ever produce an empty selection.
    #[must_use]
    pub fn available_feature_count(
        features: &[Feature],
        module: &Module,
        permission: PermissionType,
    ) -> usize {
        eligible(features, module, permission).count()
    }

    /// All modules in the matrix, ascending.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.cells.keys()
    }

    /// Allow-listed modules in ascending lexicographic order — the rows the
    /// console renders.
    pub fn visible_modules(&self) -> impl Iterator<Item = &Module> {
        self.cells.keys().filter(|module| is_allowed_module(module))
    }

    /// The selected feature IDs of one cell, if the module exists.
    #[must_use]
    pub fn cell(&self, module: &Module, permission: PermissionType) -> Option<&BTreeSet<FeatureId>> {
        self.cells.get(module)?.get(&permission)
    }

    /// Whether a cell currently holds a selection.
    #[must_use]
    pub fn is_cell_selected(&self, module: &Module, permission: PermissionType) -> bool {
        self.cell(module, permission)
            .is_some_and(|ids| !ids.is_empty())
    }

    /// Flatten every cell of every module into one deduplicated ID set.
    ///
    /// Not filtered by the allow-list: any selection the matrix holds is
    /// collected. Deduplication matters because the DELETE rule can place a
    /// feature in two cells at once. The set, iterated ascending, is the
    /// exact payload for permission assignment.
    #[must_use]
    pub fn selected_feature_ids(&self) -> BTreeSet<FeatureId> {
        self.cells
            .values()
            .flat_map(|row| row.values())
            .flatten()
            .copied()
            .collect()
    }
}

/// Active features of `module` satisfying `permission`'s rule.
fn eligible<'a>(
    features: &'a [Feature],
    module: &'a Module,
    permission: PermissionType,
) -> impl Iterator<Item = &'a Feature> {
    features.iter().filter(move |feature| {
        feature.active
            && feature.module().as_ref() == Some(module)
            && permission.matches(feature)
    })
}

// =============================================================================
// TESTS
// =============================================================================


// =============================================================================
// PROPERTY TESTS
// =============================================================================
