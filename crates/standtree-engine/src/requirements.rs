//! Requirement coverage: gate wizard progression until every required
//! depth-0 category has a concrete sub-choice.

use serde::{Deserialize, Serialize};
use standtree_model::{Key, Selection};

/// Outcome of a coverage check, with the unmet keys for diagnostic display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementReport {
    pub satisfied: bool,
    pub unmet: Vec<Key>,
}

/// A required root key is covered when at least one selection starts with
/// it *and* descends at least one level below it. A bare root-only
/// selection does not count: the operator must choose a concrete
/// sub-option.
///
/// `required_root_keys` must come from the snapshot's depth-0 `required`
/// flags ([`crate::TreeSnapshot::required_root_keys`]); tree metadata is the
/// single source of truth.
pub fn requirement_coverage(
    selections: &[Selection],
    required_root_keys: &[Key],
) -> RequirementReport {
    let unmet: Vec<Key> = required_root_keys
        .iter()
        .filter(|key| {
            !selections
                .iter()
                .any(|s| s.root_key() == Some(key.as_str()) && s.path.len() >= 2)
        })
        .cloned()
        .collect();

    RequirementReport {
        satisfied: unmet.is_empty(),
        unmet,
    }
}
