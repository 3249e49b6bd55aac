//! Route computation: k-shortest loop-free paths per destination.

use crate::fib::{FibEntry, RouteDefaults};
use ndn_topology::{GraphSnapshot, NodeId};
use ndn_wire::Name;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap};
use tracing::debug;

/// Computes candidate routes for every node from one graph snapshot.
///
/// Costs are resolved edge latencies (ms); up to `max_routes` alternative
/// simple paths per destination are found with Yen's algorithm over
/// Dijkstra. Ties break on node id ordering, so repeated runs over the
/// same snapshot yield identical FIBs.
#[derive(Debug)]
pub struct RoutingHelper {
    snapshot: GraphSnapshot,
    defaults: RouteDefaults,
    max_routes: usize,
    /// node -> sorted (neighbor, cost); parallel edges collapse to min cost
    adjacency: BTreeMap<NodeId, Vec<(NodeId, u32)>>,
}

impl RoutingHelper {
    /// Build a helper over a snapshot
    pub fn new(snapshot: GraphSnapshot, defaults: RouteDefaults, max_routes: usize) -> Self {
        let mut adjacency: BTreeMap<NodeId, Vec<(NodeId, u32)>> = BTreeMap::new();
        for node in &snapshot.nodes {
            adjacency.entry(node.id.clone()).or_default();
        }

        let mut best: HashMap<(NodeId, NodeId), u32> = HashMap::new();
        for edge in &snapshot.edges {
            if !defaults.usable(edge) {
                continue;
            }
            let cost = defaults.resolve_latency(edge);
            for (a, b) in [
                (edge.from.clone(), edge.to.clone()),
                (edge.to.clone(), edge.from.clone()),
            ] {
                let slot = best.entry((a, b)).or_insert(cost);
                if cost < *slot {
                    *slot = cost;
                }
            }
        }
        for ((a, b), cost) in best {
            adjacency.entry(a).or_default().push((b, cost));
        }
        for neighbors in adjacency.values_mut() {
            neighbors.sort();
        }

        Self {
            snapshot,
            defaults,
            max_routes: max_routes.max(1),
            adjacency,
        }
    }

    /// Configured defaults (sentinel substitutes)
    pub fn defaults(&self) -> RouteDefaults {
        self.defaults
    }

    /// Compute the FIB for every node, keyed by node id.
    ///
    /// Each destination contributes entries for its produced prefixes plus
    /// its own `/ndn/<label>` prefix, one entry per distinct first hop.
    pub fn calculate_n_possible_routes(&self) -> BTreeMap<NodeId, Vec<FibEntry>> {
        let mut fibs: BTreeMap<NodeId, Vec<FibEntry>> = BTreeMap::new();
        for node in &self.snapshot.nodes {
            fibs.insert(node.id.clone(), Vec::new());
        }

        for src in &self.snapshot.nodes {
            let mut entries: Vec<FibEntry> = Vec::new();

            for dst in &self.snapshot.nodes {
                if dst.id == src.id {
                    continue;
                }
                let prefixes = Self::advertised_prefixes(dst);
                if prefixes.is_empty() {
                    continue;
                }

                for (path, cost) in self.k_shortest_paths(&src.id, &dst.id) {
                    // path always starts at src and has at least two hops
                    let next_hop = path[1].clone();
                    for prefix in &prefixes {
                        entries.push(FibEntry::new(prefix.clone(), next_hop.clone(), cost));
                    }
                }
            }

            // Same (prefix, next hop) reachable through several
            // destinations or paths keeps only the cheapest entry
            entries.sort_by(|a, b| {
                (&a.prefix, &a.next_hop, a.cost).cmp(&(&b.prefix, &b.next_hop, b.cost))
            });
            entries.dedup_by(|a, b| a.prefix == b.prefix && a.next_hop == b.next_hop);
            entries.sort_by(|a, b| {
                (&a.prefix, a.cost, &a.next_hop).cmp(&(&b.prefix, b.cost, &b.next_hop))
            });

            fibs.insert(src.id.clone(), entries);
        }

        debug!(
            "Computed routes for {} nodes over {} edges",
            self.snapshot.nodes.len(),
            self.snapshot.edges.len()
        );
        fibs
    }

    /// Prefixes a node advertises: its produced prefixes plus `/ndn/<label>`
    fn advertised_prefixes(node: &ndn_topology::Node) -> Vec<Name> {
        let mut prefixes = node.state.produced_prefixes.clone();
        prefixes.push(node.prefix());
        prefixes.sort();
        prefixes.dedup();
        prefixes
    }

    /// Up to `max_routes` loop-free paths src -> dst, cheapest first (Yen)
    fn k_shortest_paths(&self, src: &NodeId, dst: &NodeId) -> Vec<(Vec<NodeId>, u32)> {
        let mut found: Vec<(Vec<NodeId>, u32)> = Vec::new();
        let first = match self.shortest_path(src, dst, &BTreeSet::new(), &BTreeSet::new()) {
            Some(p) => p,
            None => return found,
        };
        found.push(first);

        let mut candidates: BTreeSet<(u32, Vec<NodeId>)> = BTreeSet::new();

        while found.len() < self.max_routes {
            let prev_path = found.last().expect("found is non-empty").0.clone();

            for i in 0..prev_path.len() - 1 {
                let spur_node = &prev_path[i];
                let root_path = &prev_path[..=i];

                let mut banned_edges: BTreeSet<(NodeId, NodeId)> = BTreeSet::new();
                for (path, _) in &found {
                    if path.len() > i && path[..=i] == *root_path {
                        banned_edges.insert((path[i].clone(), path[i + 1].clone()));
                        banned_edges.insert((path[i + 1].clone(), path[i].clone()));
                    }
                }
                let banned_nodes: BTreeSet<NodeId> =
                    root_path[..i].iter().cloned().collect();

                if let Some((spur_path, _)) =
                    self.shortest_path(spur_node, dst, &banned_nodes, &banned_edges)
                {
                    let mut total: Vec<NodeId> = root_path.to_vec();
                    total.extend(spur_path.into_iter().skip(1));
                    if let Some(cost) = self.path_cost(&total) {
                        if !found.iter().any(|(p, _)| p == &total) {
                            candidates.insert((cost, total));
                        }
                    }
                }
            }

            match candidates.pop_first() {
                Some((cost, path)) => found.push((path, cost)),
                None => break,
            }
        }

        found
    }

    /// Dijkstra with banned nodes/edges; deterministic tie-break on node id
    fn shortest_path(
        &self,
        src: &NodeId,
        dst: &NodeId,
        banned_nodes: &BTreeSet<NodeId>,
        banned_edges: &BTreeSet<(NodeId, NodeId)>,
    ) -> Option<(Vec<NodeId>, u32)> {
        let mut distances: HashMap<NodeId, u32> = HashMap::new();
        let mut previous: HashMap<NodeId, NodeId> = HashMap::new();
        let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();

        distances.insert(src.clone(), 0);
        heap.push(Reverse((0, src.clone())));

        while let Some(Reverse((current_dist, current))) = heap.pop() {
            if current_dist > distances.get(&current).copied().unwrap_or(u32::MAX) {
                continue;
            }
            if &current == dst {
                break;
            }

            let Some(neighbors) = self.adjacency.get(&current) else {
                continue;
            };
            for (neighbor, cost) in neighbors {
                if banned_nodes.contains(neighbor)
                    || banned_edges.contains(&(current.clone(), neighbor.clone()))
                {
                    continue;
                }
                let new_dist = current_dist.saturating_add(*cost);
                if new_dist < distances.get(neighbor).copied().unwrap_or(u32::MAX) {
                    distances.insert(neighbor.clone(), new_dist);
                    previous.insert(neighbor.clone(), current.clone());
                    heap.push(Reverse((new_dist, neighbor.clone())));
                }
            }
        }

        let total = *distances.get(dst)?;
        let mut path = vec![dst.clone()];
        let mut cursor = dst.clone();
        while let Some(prev) = previous.get(&cursor) {
            path.push(prev.clone());
            cursor = prev.clone();
        }
        if path.last() != Some(src) {
            return None;
        }
        path.reverse();
        Some((path, total))
    }

    /// Sum of hop costs along a path; None if a hop is missing from the graph
    fn path_cost(&self, path: &[NodeId]) -> Option<u32> {
        let mut total = 0u32;
        for pair in path.windows(2) {
            let neighbors = self.adjacency.get(&pair[0])?;
            let (_, cost) = neighbors.iter().find(|(n, _)| n == &pair[1])?;
            total = total.saturating_add(*cost);
        }
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fib::DEFAULT_MAX_ROUTES;
    use ndn_topology::{Edge, Node, TopologyStore};

    fn line_snapshot(ab_latency: i32, bc_latency: i32) -> GraphSnapshot {
        let store = TopologyStore::new();
        store.add_node(Node::new("a".into(), "A"));
        store.add_node(Node::new("b".into(), "B"));
        store.add_node(Node::new("c".into(), "C"));
        let mut ab = Edge::new("ab".into(), "a".into(), "b".into());
        ab.latency_ms = ab_latency;
        let mut bc = Edge::new("bc".into(), "b".into(), "c".into());
        bc.latency_ms = bc_latency;
        store.add_edge(ab);
        store.add_edge(bc);
        store.snapshot()
    }

    #[test]
    fn test_line_reaches_far_node() {
        let helper = RoutingHelper::new(
            line_snapshot(5, 5),
            RouteDefaults::default(),
            DEFAULT_MAX_ROUTES,
        );
        let fibs = helper.calculate_n_possible_routes();

        let a_fib = &fibs[&NodeId::from("a")];
        let to_c: Vec<_> = a_fib
            .iter()
            .filter(|e| e.prefix.to_string() == "/ndn/C")
            .collect();
        assert_eq!(to_c.len(), 1);
        assert_eq!(to_c[0].next_hop, "b".into());
        assert_eq!(to_c[0].cost, 10);
    }

    #[test]
    fn test_sentinel_uses_default_latency() {
        let helper = RoutingHelper::new(
            line_snapshot(-1, 5),
            RouteDefaults {
                latency_ms: 10,
                loss_pct: 0.0,
            },
            DEFAULT_MAX_ROUTES,
        );
        let fibs = helper.calculate_n_possible_routes();

        let a_fib = &fibs[&NodeId::from("a")];
        let to_b = a_fib
            .iter()
            .find(|e| e.prefix.to_string() == "/ndn/B")
            .unwrap();
        assert_eq!(to_b.cost, 10);
    }

    #[test]
    fn test_deterministic() {
        let snapshot = line_snapshot(5, 5);
        let fibs1 = RoutingHelper::new(snapshot.clone(), RouteDefaults::default(), 3)
            .calculate_n_possible_routes();
        let fibs2 = RoutingHelper::new(snapshot, RouteDefaults::default(), 3)
            .calculate_n_possible_routes();
        assert_eq!(fibs1, fibs2);
    }

    #[test]
    fn test_diamond_alternative_paths() {
        // a - b - d and a - c - d
        let store = TopologyStore::new();
        for (id, label) in [("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")] {
            store.add_node(Node::new(id.into(), label));
        }
        for (id, from, to, latency) in [
            ("ab", "a", "b", 5),
            ("bd", "b", "d", 5),
            ("ac", "a", "c", 7),
            ("cd", "c", "d", 7),
        ] {
            let mut edge = Edge::new(id.into(), from.into(), to.into());
            edge.latency_ms = latency;
            store.add_edge(edge);
        }

        let helper = RoutingHelper::new(store.snapshot(), RouteDefaults::default(), 3);
        let fibs = helper.calculate_n_possible_routes();

        let a_fib = &fibs[&NodeId::from("a")];
        let to_d: Vec<_> = a_fib
            .iter()
            .filter(|e| e.prefix.to_string() == "/ndn/D")
            .collect();
        assert_eq!(to_d.len(), 2);
        // Cheapest candidate first
        assert_eq!(to_d[0].next_hop, "b".into());
        assert_eq!(to_d[0].cost, 10);
        assert_eq!(to_d[1].next_hop, "c".into());
        assert_eq!(to_d[1].cost, 14);
    }

    #[test]
    fn test_unreachable_node_absent() {
        let store = TopologyStore::new();
        store.add_node(Node::new("a".into(), "A"));
        store.add_node(Node::new("z".into(), "Z"));

        let helper = RoutingHelper::new(store.snapshot(), RouteDefaults::default(), 3);
        let fibs = helper.calculate_n_possible_routes();
        assert!(fibs[&NodeId::from("a")].is_empty());
        assert!(fibs[&NodeId::from("z")].is_empty());
    }

    #[test]
    fn test_fully_lossy_edge_excluded() {
        let store = TopologyStore::new();
        store.add_node(Node::new("a".into(), "A"));
        store.add_node(Node::new("b".into(), "B"));
        let mut edge = Edge::new("ab".into(), "a".into(), "b".into());
        edge.loss_pct = 100.0;
        store.add_edge(edge);

        let helper = RoutingHelper::new(store.snapshot(), RouteDefaults::default(), 3);
        let fibs = helper.calculate_n_possible_routes();
        assert!(fibs[&NodeId::from("a")].is_empty());
    }

    #[test]
    fn test_produced_prefixes_advertised() {
        let store = TopologyStore::new();
        store.add_node(Node::new("a".into(), "A"));
        store.add_node(Node::new("b".into(), "B"));
        store.update_node(&"b".into(), |n| {
            n.state.produced_prefixes = vec!["/ndn/multicast/test".parse().unwrap()];
        });
        store.add_edge(Edge::new("ab".into(), "a".into(), "b".into()));

        let helper = RoutingHelper::new(store.snapshot(), RouteDefaults::default(), 3);
        let fibs = helper.calculate_n_possible_routes();

        let prefixes: Vec<String> = fibs[&NodeId::from("a")]
            .iter()
            .map(|e| e.prefix.to_string())
            .collect();
        assert!(prefixes.contains(&"/ndn/B".to_string()));
        assert!(prefixes.contains(&"/ndn/multicast/test".to_string()));
    }
}
