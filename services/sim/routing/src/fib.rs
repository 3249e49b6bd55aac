//! FIB entry definitions and cost defaults.

use ndn_topology::{Edge, NodeId};
use ndn_wire::Name;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of alternative paths computed per destination
pub const DEFAULT_MAX_ROUTES: usize = 3;

/// One forwarding entry: a reachable prefix via one next hop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FibEntry {
    /// Destination name prefix
    pub prefix: Name,
    /// Neighbor to forward through
    pub next_hop: NodeId,
    /// Total path cost (latency sum, ms)
    pub cost: u32,
}

impl FibEntry {
    /// Create a FIB entry
    pub fn new(prefix: Name, next_hop: NodeId, cost: u32) -> Self {
        Self {
            prefix,
            next_hop,
            cost,
        }
    }
}

impl fmt::Display for FibEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {} cost={}", self.prefix, self.next_hop, self.cost)
    }
}

/// Substitutes for the negative "use default" sentinels on edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteDefaults {
    /// Default link latency in milliseconds
    pub latency_ms: u32,
    /// Default link loss percentage
    pub loss_pct: f32,
}

impl Default for RouteDefaults {
    fn default() -> Self {
        Self {
            latency_ms: 10,
            loss_pct: 0.0,
        }
    }
}

impl RouteDefaults {
    /// Edge latency with the sentinel resolved, clamped to at least 1 ms of cost
    pub fn resolve_latency(&self, edge: &Edge) -> u32 {
        if edge.latency_ms < 0 {
            self.latency_ms.max(1)
        } else {
            (edge.latency_ms as u32).max(1)
        }
    }

    /// Edge loss percentage with the sentinel resolved
    pub fn resolve_loss(&self, edge: &Edge) -> f32 {
        if edge.loss_pct < 0.0 {
            self.loss_pct
        } else {
            edge.loss_pct
        }
    }

    /// Whether an edge can carry traffic at all
    pub fn usable(&self, edge: &Edge) -> bool {
        self.resolve_loss(edge) < 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndn_topology::Edge;

    #[test]
    fn test_sentinel_substitution() {
        let defaults = RouteDefaults {
            latency_ms: 10,
            loss_pct: 2.0,
        };

        let mut edge = Edge::new("e".into(), "a".into(), "b".into());
        assert_eq!(defaults.resolve_latency(&edge), 10);
        assert_eq!(defaults.resolve_loss(&edge), 2.0);

        edge.latency_ms = 5;
        edge.loss_pct = 0.0;
        assert_eq!(defaults.resolve_latency(&edge), 5);
        assert_eq!(defaults.resolve_loss(&edge), 0.0);
    }

    #[test]
    fn test_zero_latency_costs_one() {
        let defaults = RouteDefaults::default();
        let mut edge = Edge::new("e".into(), "a".into(), "b".into());
        edge.latency_ms = 0;
        assert_eq!(defaults.resolve_latency(&edge), 1);
    }

    #[test]
    fn test_lossy_edge_unusable() {
        let defaults = RouteDefaults::default();
        let mut edge = Edge::new("e".into(), "a".into(), "b".into());
        edge.loss_pct = 100.0;
        assert!(!defaults.usable(&edge));

        edge.loss_pct = 50.0;
        assert!(defaults.usable(&edge));
    }
}
