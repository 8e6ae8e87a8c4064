//! The ordered list of committed selections.

use standtree_model::{CatalogPath, Selection};

use crate::navigate::{NavigationState, PathNavigator};

/// Result of a commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A selection was appended at `index`; the caller must reset its
    /// navigation state.
    Committed { index: usize },
    /// The path was empty; nothing changed.
    EmptyPath,
}

/// Committed selections, independent of navigation state.
///
/// Insertion order is preserved and defines display order. The same path
/// may legitimately be committed more than once (two independent flooring
/// zones, say); no uniqueness constraint exists.
#[derive(Debug, Clone, Default)]
pub struct SelectionAccumulator {
    selections: Vec<Selection>,
}

impl SelectionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Commit `path`, resolving labels through `navigator`. A no-op on the
    /// empty path. Labels are snapshot copies: later tree changes never
    /// touch an already committed selection.
    pub fn commit(&mut self, path: &CatalogPath, navigator: &PathNavigator<'_>) -> CommitOutcome {
        if path.is_empty() {
            return CommitOutcome::EmptyPath;
        }
        let labels = navigator.labels_for(path);
        self.selections.push(Selection::new(path.clone(), labels));
        CommitOutcome::Committed {
            index: self.selections.len() - 1,
        }
    }

    /// Commit the navigation cursor and reset it on success.
    pub fn commit_navigation(
        &mut self,
        nav: &mut NavigationState,
        navigator: &PathNavigator<'_>,
    ) -> CommitOutcome {
        let cursor = nav.cursor().clone();
        let outcome = self.commit(&cursor, navigator);
        if matches!(outcome, CommitOutcome::Committed { .. }) {
            nav.reset();
        }
        outcome
    }

    /// Remove by positional index, not by path identity.
    pub fn remove(&mut self, index: usize) -> Option<Selection> {
        if index < self.selections.len() {
            Some(self.selections.remove(index))
        } else {
            None
        }
    }
}
