//! Trust-state recomputation hooks.

use ndn_topology::TopologyStore;
use tracing::trace;

/// Recomputes per-node trust state after node edits.
///
/// The controller calls this on every node update; implementations write
/// their verdict into `NodeState::trust_ok`.
pub trait SecurityObserver: Send + Sync {
    /// Re-evaluate trust for every node in the store
    fn compute_security(&self, store: &TopologyStore);
}

/// Accepts every node.
///
/// Stands in for a real trust-schema evaluation; each node's self-signed
/// certificate is taken at face value.
#[derive(Debug, Default)]
pub struct TrustAllSecurity;

impl SecurityObserver for TrustAllSecurity {
    fn compute_security(&self, store: &TopologyStore) {
        for id in store.node_ids() {
            store.update_node(&id, |node| node.state.trust_ok = true);
        }
        trace!("Security pass complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndn_topology::Node;

    #[test]
    fn test_trust_all_marks_every_node() {
        let store = TopologyStore::new();
        store.add_node(Node::new("a".into(), "A"));
        store.add_node(Node::new("b".into(), "B"));

        TrustAllSecurity.compute_security(&store);

        assert!(store.node(&"a".into()).unwrap().state.trust_ok);
        assert!(store.node(&"b".into()).unwrap().state.trust_ok);
    }
}
