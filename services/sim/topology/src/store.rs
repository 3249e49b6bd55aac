//! The observable topology store.

use crate::graph::{Edge, EdgeId, GraphSnapshot, Node, NodeId};
use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Capacity of the change-event channel.
///
/// Listeners that fall further behind than this lose events; the simulation
/// controller consumes promptly, so this is sized for bulk imports.
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// A change to the topology
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyEvent {
    /// A node was added
    NodeAdded(NodeId),
    /// A node was removed
    NodeRemoved(NodeId),
    /// An edge was added
    EdgeAdded(EdgeId),
    /// An edge was removed
    EdgeRemoved(EdgeId),
}

/// Id-keyed node and edge collections with change events.
///
/// The store is the single owner of node/edge records. All mutation goes
/// through it; events are emitted after the mutation is visible, in
/// emission order per subscriber.
#[derive(Debug)]
pub struct TopologyStore {
    nodes: DashMap<NodeId, Node>,
    edges: DashMap<EdgeId, Edge>,
    events: broadcast::Sender<TopologyEvent>,
}

impl Default for TopologyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyStore {
    /// Create an empty store
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            nodes: DashMap::new(),
            edges: DashMap::new(),
            events,
        }
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<TopologyEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: TopologyEvent) {
        // A send error only means nobody is listening yet
        let _ = self.events.send(event);
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node; replaces any record with the same id
    pub fn add_node(&self, node: Node) -> NodeId {
        let id = node.id.clone();
        if self.nodes.insert(id.clone(), node).is_some() {
            warn!("Replacing existing node {}", id);
        }
        debug!("Added node {}", id);
        self.emit(TopologyEvent::NodeAdded(id.clone()));
        id
    }

    /// Remove a node and all its incident edges
    pub fn remove_node(&self, id: &NodeId) -> Option<Node> {
        let incident: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|entry| entry.value().other_end(id).is_some())
            .map(|entry| entry.key().clone())
            .collect();
        for edge_id in incident {
            self.remove_edge(&edge_id);
        }

        let removed = self.nodes.remove(id).map(|(_, node)| node);
        if removed.is_some() {
            debug!("Removed node {}", id);
            self.emit(TopologyEvent::NodeRemoved(id.clone()));
        }
        removed
    }

    /// Get a copy of a node record
    pub fn node(&self, id: &NodeId) -> Option<Node> {
        self.nodes.get(id).map(|entry| entry.value().clone())
    }

    /// Find a node by display label
    pub fn node_by_label(&self, label: &str) -> Option<Node> {
        self.nodes
            .iter()
            .find(|entry| entry.value().label == label)
            .map(|entry| entry.value().clone())
    }

    /// All node ids
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Mutate a node record in place; returns false if the node is unknown
    pub fn update_node(&self, id: &NodeId, f: impl FnOnce(&mut Node)) -> bool {
        match self.nodes.get_mut(id) {
            Some(mut entry) => {
                f(entry.value_mut());
                true
            }
            None => false,
        }
    }

    /// Add an edge; replaces any record with the same id
    pub fn add_edge(&self, edge: Edge) -> EdgeId {
        let id = edge.id.clone();
        if !self.nodes.contains_key(&edge.from) || !self.nodes.contains_key(&edge.to) {
            warn!("Edge {} references unknown endpoint", id);
        }
        self.edges.insert(id.clone(), edge);
        debug!("Added edge {}", id);
        self.emit(TopologyEvent::EdgeAdded(id.clone()));
        id
    }

    /// Remove an edge
    pub fn remove_edge(&self, id: &EdgeId) -> Option<Edge> {
        let removed = self.edges.remove(id).map(|(_, edge)| edge);
        if removed.is_some() {
            debug!("Removed edge {}", id);
            self.emit(TopologyEvent::EdgeRemoved(id.clone()));
        }
        removed
    }

    /// Get a copy of an edge record
    pub fn edge(&self, id: &EdgeId) -> Option<Edge> {
        self.edges.get(id).map(|entry| entry.value().clone())
    }

    /// Find the edge between two nodes, either direction
    pub fn edge_between(&self, a: &NodeId, b: &NodeId) -> Option<Edge> {
        self.edges
            .iter()
            .find(|entry| entry.value().connects(a, b))
            .map(|entry| entry.value().clone())
    }

    /// Mutate an edge record in place; returns false if the edge is unknown
    pub fn update_edge(&self, id: &EdgeId, f: impl FnOnce(&mut Edge)) -> bool {
        match self.edges.get_mut(id) {
            Some(mut entry) => {
                f(entry.value_mut());
                true
            }
            None => false,
        }
    }

    /// Neighbor node ids of a node, with the connecting edge id
    pub fn neighbors(&self, id: &NodeId) -> Vec<(NodeId, EdgeId)> {
        let mut out: Vec<(NodeId, EdgeId)> = self
            .edges
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .other_end(id)
                    .map(|peer| (peer.clone(), entry.key().clone()))
            })
            .collect();
        out.sort();
        out
    }

    /// Consistent copy of the whole graph
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut nodes: Vec<Node> = self.nodes.iter().map(|e| e.value().clone()).collect();
        let mut edges: Vec<Edge> = self.edges.iter().map(|e| e.value().clone()).collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        edges.sort_by(|a, b| a.id.cmp(&b.id));
        GraphSnapshot { nodes, edges }
    }
}
