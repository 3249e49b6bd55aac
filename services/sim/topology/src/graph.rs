//! Node and edge records.

use ndn_wire::Name;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node id from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a random node id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Edge identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Create an edge id from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a random edge id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One packet observed by a node with capture enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPacket {
    /// Capture timestamp, milliseconds since simulation start
    pub at_ms: u64,
    /// Packet name
    pub name: Name,
    /// Packet kind ("Interest" or "Data")
    pub kind: String,
    /// Encoded packet length in bytes
    pub length: usize,
    /// Node the packet arrived from, if any
    pub from: Option<NodeId>,
}

/// Simulation-visible per-node state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    /// Name prefixes this node produces under
    pub produced_prefixes: Vec<Name>,
    /// Human-readable FIB summary for display
    pub fib_summary: String,
    /// In-flight packets touching this node (animation counter)
    pub pending_traffic: u32,
    /// Display color override
    pub color: Option<String>,
    /// Whether packet capture is enabled on this node
    pub capture_enabled: bool,
    /// Captured packets, oldest first
    pub captured_packets: Vec<CapturedPacket>,
    /// Replay cursor into the capture buffer
    pub replay_position: usize,
    /// Live script buffer for the scripting hook
    pub code: String,
    /// Whether the node's trust state checked out on the last security pass
    pub trust_ok: bool,
}

/// A node in the topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node identity
    pub id: NodeId,
    /// Display label (also the node's name component, e.g. `/ndn/<label>`)
    pub label: String,
    /// Simulation-visible state
    pub state: NodeState,
}

impl Node {
    /// Create a node with empty state
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            state: NodeState::default(),
        }
    }

    /// The node's own name prefix derived from its label
    pub fn prefix(&self) -> Name {
        Name::root().append("ndn").append(&self.label)
    }
}

/// A link between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Edge identity
    pub id: EdgeId,
    /// One endpoint
    pub from: NodeId,
    /// Other endpoint
    pub to: NodeId,
    /// Latency in milliseconds; negative means "use default"
    pub latency_ms: i32,
    /// Loss percentage; negative means "use default"
    pub loss_pct: f32,
    /// In-flight packets on this link (animation counter)
    pub pending_traffic: u32,
}

impl Edge {
    /// Create an edge with sentinel (default) latency and loss
    pub fn new(id: EdgeId, from: NodeId, to: NodeId) -> Self {
        Self {
            id,
            from,
            to,
            latency_ms: -1,
            loss_pct: -1.0,
            pending_traffic: 0,
        }
    }

    /// Whether this edge connects the two given nodes (either direction)
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint
    pub fn other_end(&self, node: &NodeId) -> Option<&NodeId> {
        if &self.from == node {
            Some(&self.to)
        } else if &self.to == node {
            Some(&self.from)
        } else {
            None
        }
    }
}

/// Consistent copy of the graph for route computation
#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    /// All nodes at snapshot time
    pub nodes: Vec<Node>,
    /// All edges at snapshot time
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// Find a node by id
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_connects() {
        let edge = Edge::new("e1".into(), "a".into(), "b".into());
        assert!(edge.connects(&"a".into(), &"b".into()));
        assert!(edge.connects(&"b".into(), &"a".into()));
        assert!(!edge.connects(&"a".into(), &"c".into()));

        assert_eq!(edge.other_end(&"a".into()), Some(&"b".into()));
        assert_eq!(edge.other_end(&"c".into()), None);
    }

    #[test]
    fn test_node_prefix() {
        let node = Node::new("1".into(), "A");
        assert_eq!(node.prefix().to_string(), "/ndn/A");
    }

    #[test]
    fn test_edge_sentinels() {
        let edge = Edge::new("e1".into(), "a".into(), "b".into());
        assert!(edge.latency_ms < 0);
        assert!(edge.loss_pct < 0.0);
    }
}
