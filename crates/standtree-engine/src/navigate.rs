//! Cascading navigation: path resolution and the in-progress cursor.

use indexmap::IndexMap;
use standtree_model::{CatalogPath, ChildOption, Key};

use crate::snapshot::TreeSnapshot;

/// Resolves paths against one snapshot to drive the cascading dropdowns.
#[derive(Debug, Clone, Copy)]
pub struct PathNavigator<'a> {
    snapshot: &'a TreeSnapshot,
}

impl<'a> PathNavigator<'a> {
    pub fn new(snapshot: &'a TreeSnapshot) -> Self {
        Self { snapshot }
    }

    /// Selectable children at the level implied by `path`'s length; the
    /// empty path yields the root mapping. An unresolvable prefix yields an
    /// empty mapping: callers stop rendering further cascading levels, this
    /// is never an error.
    pub fn children_at(&self, path: &CatalogPath) -> IndexMap<Key, ChildOption> {
        match self.snapshot.children_of(path) {
            Some(children) => children
                .iter()
                .map(|(key, node)| (key.clone(), ChildOption::from(node)))
                .collect(),
            None => IndexMap::new(),
        }
    }

    /// Ordered display labels, one per segment. Unresolved segments degrade
    /// to the raw key string rather than failing: a label list always has
    /// exactly as many entries as the path has segments.
    pub fn labels_for(&self, path: &CatalogPath) -> Vec<String> {
        let mut labels = Vec::with_capacity(path.len());
        let mut children = Some(self.snapshot.roots());
        for key in path {
            match children.and_then(|map| map.get(key)) {
                Some(node) => {
                    labels.push(node.label.clone());
                    children = Some(&node.children);
                }
                None => {
                    labels.push(key.clone());
                    children = None;
                }
            }
        }
        labels
    }
}

// ============================================================================
// Navigation state
// ============================================================================

/// Phase of the in-progress cursor. Committing is handled by the
/// accumulator and immediately returns the cursor to `Empty`; there is no
/// lingering committed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Empty,
    Partial,
}

/// The transient, one-active-path-at-a-time cursor used while the operator
/// builds a selection level by level. Created empty each time the
/// tree-selection step is entered and cleared on every successful commit.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    cursor: CatalogPath,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> &CatalogPath {
        &self.cursor
    }

    pub fn phase(&self) -> NavPhase {
        if self.cursor.is_empty() {
            NavPhase::Empty
        } else {
            NavPhase::Partial
        }
    }

    /// Pick `key` at `level`. Entries deeper than `level` are discarded
    /// (prefix truncation): changing an ancestor invalidates every
    /// descendant choice.
    pub fn select(&mut self, level: usize, key: impl Into<Key>) {
        self.cursor = self.cursor.set_at(level, key);
    }

    /// Drop back to the empty phase.
    pub fn reset(&mut self) {
        self.cursor = CatalogPath::root();
    }
}
