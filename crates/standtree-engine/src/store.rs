//! Generation-guarded snapshot holder.
//!
//! Fetches are asynchronous, so two rapid refreshes can complete out of
//! order. Each refresh takes a monotonic ticket; installing a snapshot with
//! a superseded ticket is rejected, so a late-arriving stale response never
//! overwrites a newer tree. Readers always see the last installed snapshot,
//! never a partial one.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::snapshot::TreeSnapshot;

/// Ticket identifying one refresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug)]
struct StoreInner {
    snapshot: Arc<TreeSnapshot>,
    /// Generation of the installed snapshot (0 = nothing installed yet).
    installed: u64,
    /// Last ticket handed out.
    issued: u64,
}

/// Shared holder for the current tree snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                snapshot: Arc::new(TreeSnapshot::empty()),
                installed: 0,
                issued: 0,
            })),
        }
    }

    /// The last successfully installed snapshot.
    pub fn current(&self) -> Arc<TreeSnapshot> {
        self.inner.read().snapshot.clone()
    }

    /// Whether any fetch has completed yet.
    pub fn is_loaded(&self) -> bool {
        self.inner.read().installed > 0
    }

    /// Start a refresh attempt. Call before issuing the fetch request.
    pub fn begin_refresh(&self) -> RefreshTicket {
        let mut inner = self.inner.write();
        inner.issued += 1;
        RefreshTicket(inner.issued)
    }

    /// Install the snapshot fetched under `ticket`. Returns `false` when a
    /// newer refresh already installed, in which case the snapshot is
    /// discarded.
    pub fn install(&self, ticket: RefreshTicket, snapshot: TreeSnapshot) -> bool {
        let mut inner = self.inner.write();
        if ticket.0 <= inner.installed {
            tracing::warn!(
                ticket = ticket.0,
                installed = inner.installed,
                "discarding superseded tree snapshot"
            );
            return false;
        }
        tracing::debug!(
            ticket = ticket.0,
            nodes = snapshot.node_count(),
            "installing tree snapshot"
        );
        inner.snapshot = Arc::new(snapshot);
        inner.installed = ticket.0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use standtree_model::{CategoryNode, WireNode};

    fn snapshot_with_root(key: &str) -> TreeSnapshot {
        let mut roots = IndexMap::new();
        roots.insert(key.to_string(), CategoryNode::leaf(key, key.to_uppercase()));
        TreeSnapshot::from_roots(roots)
    }

    #[test]
    fn test_install_in_order() {
        let store = SnapshotStore::new();
        assert!(!store.is_loaded());

        let ticket = store.begin_refresh();
        assert!(store.install(ticket, snapshot_with_root("flooring")));
        assert!(store.is_loaded());
        assert!(store.current().roots().contains_key("flooring"));
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let store = SnapshotStore::new();

        let first = store.begin_refresh();
        let second = store.begin_refresh();

        // second refresh completes first
        assert!(store.install(second, snapshot_with_root("newer")));
        // the stale first response must not overwrite it
        assert!(!store.install(first, snapshot_with_root("stale")));
        assert!(store.current().roots().contains_key("newer"));
    }

    #[test]
    fn test_readers_see_previous_snapshot_mid_refresh() {
        let store = SnapshotStore::new();
        let ticket = store.begin_refresh();
        store.install(ticket, snapshot_with_root("flooring"));

        let _in_flight = store.begin_refresh();
        // nothing installed yet for the in-flight refresh
        assert!(store.current().roots().contains_key("flooring"));
    }

    #[test]
    fn test_from_wire_snapshot_installs() {
        let store = SnapshotStore::new();
        let wire: IndexMap<String, WireNode> =
            serde_json::from_str(r#"{ "walls": { "label": "Duvar" } }"#).expect("payload");
        let ticket = store.begin_refresh();
        assert!(store.install(ticket, TreeSnapshot::from_wire(wire)));
        assert_eq!(store.current().node_count(), 1);
    }
}
