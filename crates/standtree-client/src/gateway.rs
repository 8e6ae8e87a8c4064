//! Path-addressed structural mutations with wholesale refetch.
//!
//! Every successful mutation is followed by a full-tree refetch rather than
//! incremental local patching. Structural edits are an infrequent
//! administrative action, so the extra round trip buys guaranteed
//! client/server consistency.

use std::sync::Arc;

use standtree_engine::{SnapshotStore, TreeSnapshot};
use standtree_model::{derive_key, CatalogPath, Key};

use crate::transport::{CatalogTransport, GatewayError, NodeDeleteRequest, NodeWriteRequest};

/// Optional attributes for created or edited nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeMetadata {
    /// Explicit sibling key; derived from the label when absent.
    pub key: Option<Key>,
    pub element_type: Option<String>,
    pub input_type: Option<String>,
}

/// A staged subtree deletion awaiting explicit confirmation.
///
/// Deletion is irreversible and cascades through the whole subtree, so the
/// operator must see what is affected before any request is issued. Only a
/// staged value can be confirmed; there is no one-shot delete.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub path: CatalogPath,
    pub label: String,
    pub descendant_count: usize,
}

impl PendingDelete {
    /// Warning text naming the affected subtree.
    pub fn warning(&self) -> String {
        if self.descendant_count == 0 {
            format!("\"{}\" will be permanently deleted.", self.label)
        } else {
            format!(
                "\"{}\" and its {} sub-elements will be permanently deleted.",
                self.label, self.descendant_count
            )
        }
    }
}

/// Issues path-addressed mutations and keeps the snapshot store fresh.
pub struct TreeMutationGateway<T: CatalogTransport> {
    transport: T,
    store: SnapshotStore,
}

impl<T: CatalogTransport> TreeMutationGateway<T> {
    pub fn new(transport: T, store: SnapshotStore) -> Self {
        Self { transport, store }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Fetch the full tree and install it, unless a newer refresh already
    /// landed. Returns the snapshot current after the attempt.
    pub async fn refresh(&self) -> Result<Arc<TreeSnapshot>, GatewayError> {
        let ticket = self.store.begin_refresh();
        let wire = self.transport.fetch_tree().await?;
        self.store.install(ticket, TreeSnapshot::from_wire(wire));
        Ok(self.store.current())
    }

    /// Create a node under `parent_path` (`None` for the root level).
    /// Returns the key the node was created with.
    ///
    /// The only client-side validation is the non-empty label check;
    /// duplicate keys and everything else are the backend's call and its
    /// error message is surfaced verbatim.
    pub async fn add_node(
        &self,
        parent_path: Option<&CatalogPath>,
        label: &str,
        metadata: NodeMetadata,
    ) -> Result<Key, GatewayError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(GatewayError::Validation("label must not be empty".to_string()));
        }
        let key = match metadata.key {
            Some(key) => key,
            None => derive_key(label).map_err(|e| GatewayError::Validation(e.to_string()))?,
        };

        let request = NodeWriteRequest {
            key: Some(key.clone()),
            label: label.to_string(),
            element_type: metadata.element_type,
            input_type: metadata.input_type,
            parent_path: parent_path
                .filter(|p| !p.is_empty())
                .map(ToString::to_string),
        };
        self.transport.create_node(&request).await?;
        tracing::info!(key = %key, parent = ?request.parent_path, "created catalog node");

        self.refresh().await?;
        Ok(key)
    }

    /// Upsert the node addressed by its existing full path. Sibling
    /// ordering is untouched.
    pub async fn edit_node(
        &self,
        path: &CatalogPath,
        new_label: &str,
        metadata: NodeMetadata,
    ) -> Result<(), GatewayError> {
        let (parent, key) = path
            .split_last()
            .ok_or_else(|| GatewayError::Validation("the root path addresses no node".to_string()))?;
        let new_label = new_label.trim();
        if new_label.is_empty() {
            return Err(GatewayError::Validation("label must not be empty".to_string()));
        }

        let request = NodeWriteRequest {
            key: Some(key.to_string()),
            label: new_label.to_string(),
            element_type: metadata.element_type,
            input_type: metadata.input_type,
            parent_path: if parent.is_empty() {
                None
            } else {
                Some(parent.to_string())
            },
        };
        self.transport.update_node(&request).await?;
        tracing::info!(path = %path, "updated catalog node");

        self.refresh().await?;
        Ok(())
    }

    /// First step of deletion: describe the subtree the operator is about
    /// to lose. No request is issued here.
    pub fn stage_delete(&self, path: &CatalogPath) -> Result<PendingDelete, GatewayError> {
        let snapshot = self.store.current();
        let node = snapshot
            .resolve(path)
            .ok_or_else(|| GatewayError::Validation(format!("no element at path {path}")))?;
        Ok(PendingDelete {
            path: path.clone(),
            label: node.label.clone(),
            descendant_count: node.descendant_count(),
        })
    }

    /// Second step: issue the delete the operator confirmed. Cascading
    /// through the subtree is the backend's contract; this ends at issuing
    /// the call and refreshing the snapshot.
    pub async fn confirm_delete(&self, pending: PendingDelete) -> Result<(), GatewayError> {
        let (parent, key) = pending
            .path
            .split_last()
            .ok_or_else(|| GatewayError::Validation("the root path addresses no node".to_string()))?;

        let request = NodeDeleteRequest {
            key: key.to_string(),
            parent_path: if parent.is_empty() {
                None
            } else {
                Some(parent.to_string())
            },
        };
        tracing::warn!(
            path = %pending.path,
            descendants = pending.descendant_count,
            "deleting catalog subtree"
        );
        self.transport.delete_node(&request).await?;

        self.refresh().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use indexmap::IndexMap;
    use standtree_model::WireNode;

    fn seeded_gateway() -> TreeMutationGateway<MockTransport> {
        let wire: IndexMap<String, WireNode> = serde_json::from_str(
            r#"{
                "flooring": {
                    "label": "Zemin",
                    "required": true,
                    "subElements": {
                        "carpet": { "label": "Halı" },
                        "tile": { "label": "Karo" }
                    }
                }
            }"#,
        )
        .expect("payload");
        TreeMutationGateway::new(MockTransport::new(wire), SnapshotStore::new())
    }

    #[tokio::test]
    async fn test_refresh_installs_snapshot() {
        let gateway = seeded_gateway();
        let snapshot = gateway.refresh().await.expect("refresh");
        assert_eq!(snapshot.node_count(), 3);
        assert!(gateway.store().is_loaded());
    }

    #[tokio::test]
    async fn test_add_node_derives_key_and_refetches() {
        let gateway = seeded_gateway();
        gateway.refresh().await.expect("initial fetch");

        let parent = CatalogPath::from_segments(["flooring"]);
        let key = gateway
            .add_node(Some(&parent), "Özel Masa!!", NodeMetadata::default())
            .await
            .expect("add");
        assert!(key.starts_with("ozel_masa_"));

        let snapshot = gateway.store().current();
        let node = snapshot.resolve(&parent.child(key.clone())).expect("created node");
        assert_eq!(node.label, "Özel Masa!!");
    }

    #[tokio::test]
    async fn test_add_node_rejects_empty_label_without_network_call() {
        let gateway = seeded_gateway();
        let err = gateway
            .add_node(None, "   ", NodeMetadata::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
        // nothing was sent
        assert!(gateway
            .transport
            .calls()
            .iter()
            .all(|c| !c.starts_with("create_node")));
    }

    #[tokio::test]
    async fn test_add_node_surfaces_backend_duplicate() {
        let gateway = seeded_gateway();
        gateway.refresh().await.expect("initial fetch");

        let parent = CatalogPath::from_segments(["flooring"]);
        let metadata = NodeMetadata {
            key: Some("carpet".to_string()),
            ..NodeMetadata::default()
        };
        let err = gateway
            .add_node(Some(&parent), "Halı", metadata)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn test_edit_node_keeps_sibling_order() {
        let gateway = seeded_gateway();
        gateway.refresh().await.expect("initial fetch");

        gateway
            .edit_node(
                &CatalogPath::from_segments(["flooring", "carpet"]),
                "Halı Kaplama",
                NodeMetadata::default(),
            )
            .await
            .expect("edit");

        let snapshot = gateway.store().current();
        let flooring = snapshot
            .resolve(&CatalogPath::from_segments(["flooring"]))
            .expect("flooring");
        let keys: Vec<&String> = flooring.children.keys().collect();
        assert_eq!(keys, vec!["carpet", "tile"]);
        assert_eq!(flooring.children["carpet"].label, "Halı Kaplama");
    }

    #[tokio::test]
    async fn test_edit_root_path_is_rejected() {
        let gateway = seeded_gateway();
        let err = gateway
            .edit_node(&CatalogPath::root(), "X", NodeMetadata::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_is_two_step_and_names_the_subtree() {
        let gateway = seeded_gateway();
        gateway.refresh().await.expect("initial fetch");

        let path = CatalogPath::from_segments(["flooring"]);
        let pending = gateway.stage_delete(&path).expect("stage");
        assert_eq!(pending.label, "Zemin");
        assert_eq!(pending.descendant_count, 2);
        assert!(pending.warning().contains("Zemin"));
        assert!(pending.warning().contains('2'));

        // staging issued no delete call
        assert!(gateway
            .transport
            .calls()
            .iter()
            .all(|c| !c.starts_with("delete_node")));

        gateway.confirm_delete(pending).await.expect("confirm");
        assert!(gateway.store().current().is_empty());
    }

    #[tokio::test]
    async fn test_stage_delete_of_missing_node_fails() {
        let gateway = seeded_gateway();
        gateway.refresh().await.expect("initial fetch");
        let err = gateway
            .stage_delete(&CatalogPath::from_segments(["flooring", "vinyl"]))
            .unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }
}
