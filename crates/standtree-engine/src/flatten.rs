//! Flat, depth-annotated listing of the tree for the management view.

use standtree_model::{CatalogPath, CategoryNode};

use crate::snapshot::TreeSnapshot;

/// One row of the flattened listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry<'a> {
    pub key: &'a str,
    pub node: &'a CategoryNode,
    /// Path of the ancestors, excluding the node's own key.
    pub ancestor_path: CatalogPath,
    /// Depth 0 is the root level.
    pub depth: usize,
}

impl FlatEntry<'_> {
    /// Full path of the node itself.
    pub fn path(&self) -> CatalogPath {
        self.ancestor_path.child(self.key)
    }
}

/// Pre-order traversal, siblings in their mapping's iteration order. Pure:
/// the whole output derives from the snapshot argument.
pub fn flatten(snapshot: &TreeSnapshot) -> Vec<FlatEntry<'_>> {
    let mut out = Vec::with_capacity(snapshot.node_count());
    for (key, node) in snapshot.roots() {
        push_subtree(key, node, CatalogPath::root(), 0, &mut out);
    }
    out
}

fn push_subtree<'a>(
    key: &'a str,
    node: &'a CategoryNode,
    ancestor_path: CatalogPath,
    depth: usize,
    out: &mut Vec<FlatEntry<'a>>,
) {
    out.push(FlatEntry {
        key,
        node,
        ancestor_path: ancestor_path.clone(),
        depth,
    });
    let own_path = ancestor_path.child(key);
    for (child_key, child) in &node.children {
        push_subtree(child_key, child, own_path.clone(), depth + 1, out);
    }
}

/// Pure positional move producing a new ordering. Out-of-range indices
/// leave the order unchanged.
///
/// Reordering is a session-local display aid: the collaborator contract has
/// no sibling-order field, so nothing is pushed back to the backend.
pub fn reorder<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = list.to_vec();
    if from < out.len() && to < out.len() {
        let item = out.remove(from);
        out.insert(to, item);
    }
    out
}
