//! Category nodes and the wire-format adapter.
//!
//! The in-memory shape is a single recursive [`CategoryNode`] whose children
//! live in an `IndexMap` (insertion order is the authoritative display and
//! traversal order). The backend's legacy payload uses `subElements` for the
//! depth-0 children attribute and `children` deeper down; both are accepted
//! on input and only the normalized shape exists past this module.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Key;

/// One entry in the hierarchical stand-element catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Key of this node, unique among its siblings only.
    pub key: Key,
    /// Display text.
    pub label: String,
    /// Optional short icon identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Whether this branch must have a concrete sub-choice. Meaningful only
    /// at depth 0.
    #[serde(default)]
    pub required: bool,
    /// Free-form element tag (e.g. "furniture", "surface").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    /// Free-form input tag (e.g. "single", "multi").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Ordered children mapping; empty if this node is a leaf.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<Key, CategoryNode>,
}

impl CategoryNode {
    /// Leaf node with just a key and label.
    pub fn leaf(key: impl Into<Key>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: None,
            required: false,
            element_type: None,
            input_type: None,
            children: IndexMap::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes strictly below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Summary of a selectable child, as rendered in one cascading dropdown
/// level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildOption {
    pub label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl From<&CategoryNode> for ChildOption {
    fn from(node: &CategoryNode) -> Self {
        Self {
            label: node.label.clone(),
            required: node.required,
            icon: node.icon.clone(),
        }
    }
}

// ============================================================================
// Wire format
// ============================================================================

/// A node as the backend serializes it.
///
/// The value side of the fetch payload carries no `key` (keys are the
/// mapping keys), and the legacy depth-0 attribute name `subElements` is
/// accepted as an alias of `children` at every level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireNode {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(
        default,
        alias = "subElements",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub children: IndexMap<Key, WireNode>,
}

impl WireNode {
    /// Attach the mapping key and normalize recursively.
    pub fn into_node(self, key: &str) -> CategoryNode {
        CategoryNode {
            key: key.to_string(),
            label: self.label,
            icon: self.icon,
            required: self.required,
            element_type: self.element_type,
            input_type: self.input_type,
            children: self
                .children
                .into_iter()
                .map(|(k, child)| {
                    let node = child.into_node(&k);
                    (k, node)
                })
                .collect(),
        }
    }
}

/// Normalize a full fetch payload into the root mapping.
pub fn catalog_from_wire(wire: IndexMap<Key, WireNode>) -> IndexMap<Key, CategoryNode> {
    wire.into_iter()
        .map(|(key, node)| {
            let node = node.into_node(&key);
            (key, node)
        })
        .collect()
}
