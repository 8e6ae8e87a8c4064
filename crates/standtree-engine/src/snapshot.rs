//! The immutable-per-fetch view of the catalog tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use standtree_model::{catalog_from_wire, CatalogPath, CategoryNode, Key, WireNode};

/// A full catalog tree as fetched from the backend.
///
/// A snapshot is never patched in place: every successful mutation is
/// followed by a wholesale refetch and the store swaps the whole snapshot.
/// Readers therefore never observe a partially written tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    roots: IndexMap<Key, CategoryNode>,
}

impl TreeSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_roots(roots: IndexMap<Key, CategoryNode>) -> Self {
        Self { roots }
    }

    /// Normalize a raw fetch payload.
    pub fn from_wire(wire: IndexMap<Key, WireNode>) -> Self {
        Self {
            roots: catalog_from_wire(wire),
        }
    }

    /// Depth-0 mapping, in display order.
    pub fn roots(&self) -> &IndexMap<Key, CategoryNode> {
        &self.roots
    }

    /// Walk the tree along `path`. The root path resolves to no node.
    pub fn resolve(&self, path: &CatalogPath) -> Option<&CategoryNode> {
        let mut segments = path.segments().iter();
        let first = segments.next()?;
        let mut node = self.roots.get(first)?;
        for key in segments {
            node = node.children.get(key)?;
        }
        Some(node)
    }

    /// The children mapping at the level `path` points into: the root
    /// mapping for the empty path, otherwise the resolved node's children.
    /// `None` when any prefix segment fails to resolve.
    pub fn children_of(&self, path: &CatalogPath) -> Option<&IndexMap<Key, CategoryNode>> {
        if path.is_empty() {
            return Some(&self.roots);
        }
        self.resolve(path).map(|node| &node.children)
    }

    /// Keys of the depth-0 categories flagged required. This is the single
    /// source of truth for requirement checking; there is no hardcoded
    /// fallback list.
    pub fn required_root_keys(&self) -> Vec<Key> {
        self.roots
            .iter()
            .filter(|(_, node)| node.required)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.roots
            .values()
            .map(|node| 1 + node.descendant_count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
