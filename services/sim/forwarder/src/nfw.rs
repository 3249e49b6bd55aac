//! The per-node forwarder and its registry.

use crate::cs::{ContentStore, DEFAULT_CS_CAPACITY};
use crate::dnl::DeadNonceList;
use crate::error::SendError;
use crate::pit::{Pit, PitRole};
use dashmap::DashMap;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use ndn_routing::{FibEntry, RouteDefaults};
use ndn_topology::{CapturedPacket, EdgeId, NodeId, TopologyStore};
use ndn_wire::{Data, Interest, Name};
use rand::Rng;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Default real-time stretch applied to link latencies
pub const DEFAULT_LATENCY_SLOWDOWN: u32 = 10;

/// Tuning knobs shared by every forwarder in a simulation
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    /// Substitutes for edge latency/loss sentinels
    pub defaults: RouteDefaults,
    /// Content Store capacity, in packets
    pub content_store_size: usize,
    /// Multiplier turning link latency into wall-clock transit time
    pub latency_slowdown: u32,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            defaults: RouteDefaults::default(),
            content_store_size: DEFAULT_CS_CAPACITY,
            latency_slowdown: DEFAULT_LATENCY_SLOWDOWN,
        }
    }
}

/// Forwarding strategy for a name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Forward on the single cheapest next hop
    BestRoute,
    /// Forward on every distinct next hop at once
    Multicast,
}

/// Async producer callback invoked for Interests under a registered prefix
pub type ProducerFn =
    Arc<dyn Fn(Interest) -> BoxFuture<'static, Option<Data>> + Send + Sync>;

/// All live forwarders, keyed by node id.
///
/// The control layer creates a forwarder when a node appears and removes it
/// when the node goes away; everything else looks neighbors up here.
#[derive(Default)]
pub struct ForwarderRegistry {
    forwarders: DashMap<NodeId, Arc<NodeForwarder>>,
}

impl ForwarderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a forwarder, replacing any previous one for the node
    pub fn insert(&self, fw: Arc<NodeForwarder>) {
        self.forwarders.insert(fw.node_id().clone(), fw);
    }

    /// Look a forwarder up by node id
    pub fn get(&self, id: &NodeId) -> Option<Arc<NodeForwarder>> {
        self.forwarders.get(id).map(|entry| entry.value().clone())
    }

    /// Whether a node already has a forwarder
    pub fn contains(&self, id: &NodeId) -> bool {
        self.forwarders.contains_key(id)
    }

    /// Drop the forwarder for a removed node
    pub fn remove(&self, id: &NodeId) -> Option<Arc<NodeForwarder>> {
        self.forwarders.remove(id).map(|(_, fw)| fw)
    }

    /// Number of live forwarders
    pub fn len(&self) -> usize {
        self.forwarders.len()
    }

    /// Whether no forwarders exist
    pub fn is_empty(&self) -> bool {
        self.forwarders.is_empty()
    }
}

/// One node's forwarding plane.
///
/// Pipeline for an incoming Interest: capture, loop suppression (DNL),
/// Content Store, local producers, then PIT aggregation and FIB-driven
/// forwarding to neighbor forwarders with simulated link transit.
pub struct NodeForwarder {
    node_id: NodeId,
    store: Arc<TopologyStore>,
    registry: Arc<ForwarderRegistry>,
    config: ForwarderConfig,
    started_at: Instant,
    fib: RwLock<Vec<FibEntry>>,
    cs: Mutex<ContentStore>,
    pit: Pit,
    dnl: DeadNonceList,
    producers: RwLock<Vec<(Name, ProducerFn)>>,
    strategies: RwLock<Vec<(Name, Strategy)>>,
}

impl NodeForwarder {
    /// Create a forwarder for a node.
    ///
    /// Installs the default strategies: best-route everywhere, multicast
    /// under `/ndn/multicast`.
    pub fn new(
        node_id: NodeId,
        store: Arc<TopologyStore>,
        registry: Arc<ForwarderRegistry>,
        config: ForwarderConfig,
    ) -> Arc<Self> {
        let strategies = vec![
            (Name::root(), Strategy::BestRoute),
            (
                Name::root().append("ndn").append("multicast"),
                Strategy::Multicast,
            ),
        ];
        Arc::new(Self {
            node_id,
            store,
            registry,
            cs: Mutex::new(ContentStore::new(config.content_store_size)),
            config,
            started_at: Instant::now(),
            fib: RwLock::new(Vec::new()),
            pit: Pit::new(),
            dnl: DeadNonceList::new(),
            producers: RwLock::new(Vec::new()),
            strategies: RwLock::new(strategies),
        })
    }

    /// The node this forwarder belongs to
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Replace the FIB wholesale with freshly computed entries
    pub fn set_fib(&self, entries: Vec<FibEntry>) {
        let mut fib = self.fib.write().unwrap_or_else(|e| e.into_inner());
        *fib = entries;
    }

    /// Current FIB entries
    pub fn fib(&self) -> Vec<FibEntry> {
        self.fib.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Human-readable FIB lines for display
    pub fn strs_fib(&self) -> Vec<String> {
        self.fib().iter().map(|e| e.to_string()).collect()
    }

    /// Override the strategy for a prefix
    pub fn set_strategy(&self, prefix: Name, strategy: Strategy) {
        let mut strategies = self.strategies.write().unwrap_or_else(|e| e.into_inner());
        strategies.retain(|(p, _)| p != &prefix);
        strategies.push((prefix, strategy));
    }

    /// Register a producer under a prefix and advertise it on the node
    pub fn register_producer(&self, prefix: Name, handler: ProducerFn) {
        {
            let mut producers = self.producers.write().unwrap_or_else(|e| e.into_inner());
            producers.retain(|(p, _)| p != &prefix);
            producers.push((prefix.clone(), handler));
        }
        self.store.update_node(&self.node_id, |node| {
            if !node.state.produced_prefixes.contains(&prefix) {
                node.state.produced_prefixes.push(prefix.clone());
                node.state.produced_prefixes.sort();
            }
        });
        debug!("Node {} now produces under {}", self.node_id, prefix);
    }

    /// Drop all producers and their advertisements
    pub fn clear_producers(&self) {
        self.producers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.store.update_node(&self.node_id, |node| {
            node.state.produced_prefixes.clear();
        });
    }

    /// React to an edit of the node record: cached content may describe a
    /// world that no longer exists, so flush it
    pub fn node_updated(&self) {
        self.cs.lock().unwrap_or_else(|e| e.into_inner()).clear();
        trace!("Node {} forwarder state refreshed", self.node_id);
    }

    /// Number of Interests currently pending
    pub fn pending_interests(&self) -> usize {
        self.pit.len()
    }

    /// Express an Interest from this node's own application face
    pub async fn express_interest(self: &Arc<Self>, interest: Interest) -> Result<Data, SendError> {
        let lifetime = interest.lifetime_ms;
        let name = interest.name.to_string();
        match tokio::time::timeout(
            Duration::from_millis(lifetime),
            self.clone().handle_interest(interest, None),
        )
        .await
        {
            Ok(Some(data)) => Ok(data),
            Ok(None) => Err(SendError::NoRoute(name)),
            Err(_) => Err(SendError::Timeout(lifetime)),
        }
    }

    /// Full Interest pipeline; `from` names the neighbor that sent it, or
    /// None for the local face
    pub fn handle_interest(
        self: Arc<Self>,
        interest: Interest,
        from: Option<NodeId>,
    ) -> BoxFuture<'static, Option<Data>> {
        async move {
            self.capture("Interest", &interest.name, interest.encode().len(), &from);

            if !self.dnl.observe(&interest) {
                trace!(
                    "Node {} dropped looping interest {} nonce {}",
                    self.node_id,
                    interest.name,
                    interest.nonce
                );
                return None;
            }

            if let Some(cached) = self
                .cs
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .lookup(&interest)
            {
                trace!("Node {} CS hit for {}", self.node_id, interest.name);
                self.capture("Data", &cached.name, cached.encode().len(), &None);
                return Some(cached);
            }

            if let Some(handler) = self.local_producer(&interest.name) {
                if let Some(data) = handler(interest.clone()).await {
                    self.cs
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .insert(data.clone());
                    self.capture("Data", &data.name, data.encode().len(), &None);
                    return Some(data);
                }
            }

            let Some(downstream) = interest.decrement_hop_limit() else {
                warn!("Node {} dropped {}: hop limit exhausted", self.node_id, interest.name);
                return None;
            };

            let lifetime = Duration::from_millis(interest.lifetime_ms);
            let (role, rx) = self.pit.register(&interest);
            match role {
                PitRole::Aggregate => {
                    trace!("Node {} aggregated {}", self.node_id, interest.name);
                    match tokio::time::timeout(lifetime, rx).await {
                        Ok(Ok(data)) => Some(data),
                        _ => None,
                    }
                }
                PitRole::Forward => {
                    // The guard expires the entry on timeout, failure, or the
                    // whole pipeline being dropped before it resolves
                    let pending = self.pit.guard(&interest);
                    let result = tokio::time::timeout(
                        lifetime,
                        self.forward(downstream, from.as_ref()),
                    )
                    .await
                    .unwrap_or(None);

                    match result {
                        Some(data) => {
                            self.cs
                                .lock()
                                .unwrap_or_else(|e| e.into_inner())
                                .insert(data.clone());
                            self.capture("Data", &data.name, data.encode().len(), &None);
                            self.pit.satisfy(&data);
                            pending.disarm();
                            Some(data)
                        }
                        None => None,
                    }
                }
            }
        }
        .boxed()
    }

    /// Fan the Interest out per the matching strategy; first Data wins
    async fn forward(self: &Arc<Self>, interest: Interest, from: Option<&NodeId>) -> Option<Data> {
        let next_hops = self.select_next_hops(&interest.name, from);
        if next_hops.is_empty() {
            debug!("Node {} has no route for {}", self.node_id, interest.name);
            return None;
        }

        let mut in_flight: FuturesUnordered<_> = next_hops
            .into_iter()
            .map(|hop| {
                let this = self.clone();
                let interest = interest.clone();
                async move { this.forward_to_hop(interest, hop).await }
            })
            .collect();

        while let Some(result) = in_flight.next().await {
            if result.is_some() {
                return result;
            }
        }
        None
    }

    /// Next hops for a name: longest-prefix FIB matches filtered through the
    /// strategy choice, never back toward the sender
    fn select_next_hops(&self, name: &Name, from: Option<&NodeId>) -> Vec<NodeId> {
        let fib = self.fib.read().unwrap_or_else(|e| e.into_inner());
        let mut matches: Vec<&FibEntry> = fib
            .iter()
            .filter(|e| e.prefix.is_prefix_of(name))
            .filter(|e| Some(&e.next_hop) != from)
            .collect();
        if matches.is_empty() {
            return Vec::new();
        }
        // Only entries at the longest matching prefix compete
        let longest = matches.iter().map(|e| e.prefix.len()).max().unwrap_or(0);
        matches.retain(|e| e.prefix.len() == longest);
        matches.sort_by(|a, b| (a.cost, &a.next_hop).cmp(&(b.cost, &b.next_hop)));

        match self.strategy_for(name) {
            Strategy::BestRoute => matches
                .first()
                .map(|e| vec![e.next_hop.clone()])
                .unwrap_or_default(),
            Strategy::Multicast => {
                let mut hops: Vec<NodeId> =
                    matches.iter().map(|e| e.next_hop.clone()).collect();
                hops.sort();
                hops.dedup();
                hops
            }
        }
    }

    fn strategy_for(&self, name: &Name) -> Strategy {
        let strategies = self.strategies.read().unwrap_or_else(|e| e.into_inner());
        strategies
            .iter()
            .filter(|(prefix, _)| prefix.is_prefix_of(name))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, strategy)| *strategy)
            .unwrap_or(Strategy::BestRoute)
    }

    /// One hop out and, if answered, back: both directions pay transit
    /// latency and roll the loss dice
    async fn forward_to_hop(self: &Arc<Self>, interest: Interest, hop: NodeId) -> Option<Data> {
        let Some(remote) = self.registry.get(&hop) else {
            warn!("Node {} FIB points at {} which has no forwarder", self.node_id, hop);
            return None;
        };

        if !self.transit(&hop).await {
            debug!("Interest {} lost on link {} -> {}", interest.name, self.node_id, hop);
            return None;
        }

        let data = remote
            .handle_interest(interest.clone(), Some(self.node_id.clone()))
            .await?;

        if !self.transit(&hop).await {
            debug!("Data {} lost on link {} -> {}", data.name, hop, self.node_id);
            return None;
        }
        Some(data)
    }

    /// Simulate one direction of link transit; false means the packet was
    /// dropped by loss
    async fn transit(&self, peer: &NodeId) -> bool {
        let Some(edge) = self.store.edge_between(&self.node_id, peer) else {
            return false;
        };
        let latency = self.config.defaults.resolve_latency(&edge);
        let loss = self.config.defaults.resolve_loss(&edge);
        let delay =
            Duration::from_millis(u64::from(latency) * u64::from(self.config.latency_slowdown));

        // Multicast races drop losing branches mid-sleep; the guard keeps
        // the counters balanced anyway
        let _in_flight = TransitCounters::raise(&self.store, edge.id.clone(), peer);

        tokio::time::sleep(delay).await;

        if loss > 0.0 {
            let roll: f32 = rand::thread_rng().gen_range(0.0..100.0);
            if roll < loss {
                return false;
            }
        }
        true
    }

    /// Longest-prefix matching local producer, if any
    fn local_producer(&self, name: &Name) -> Option<ProducerFn> {
        let producers = self.producers.read().unwrap_or_else(|e| e.into_inner());
        producers
            .iter()
            .filter(|(prefix, _)| prefix.is_prefix_of(name))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, handler)| handler.clone())
    }

    /// Record a packet on the node if capture is enabled
    fn capture(&self, kind: &str, name: &Name, length: usize, from: &Option<NodeId>) {
        let at_ms = self.started_at.elapsed().as_millis() as u64;
        self.store.update_node(&self.node_id, |node| {
            if node.state.capture_enabled {
                node.state.captured_packets.push(CapturedPacket {
                    at_ms,
                    name: name.clone(),
                    kind: kind.to_string(),
                    length,
                    from: from.clone(),
                });
            }
        });
    }
}

/// Pending-traffic counters for one packet on one link, decremented on drop
/// so a cancelled transit cannot strand them
struct TransitCounters<'a> {
    store: &'a TopologyStore,
    edge_id: EdgeId,
    peer: &'a NodeId,
}

impl<'a> TransitCounters<'a> {
    fn raise(store: &'a TopologyStore, edge_id: EdgeId, peer: &'a NodeId) -> Self {
        store.update_edge(&edge_id, |e| e.pending_traffic += 1);
        store.update_node(peer, |n| n.state.pending_traffic += 1);
        Self {
            store,
            edge_id,
            peer,
        }
    }
}

impl Drop for TransitCounters<'_> {
    fn drop(&mut self) {
        self.store.update_edge(&self.edge_id, |e| {
            e.pending_traffic = e.pending_traffic.saturating_sub(1)
        });
        self.store.update_node(self.peer, |n| {
            n.state.pending_traffic = n.state.pending_traffic.saturating_sub(1)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use ndn_topology::{Edge, Node};

    fn setup(n: usize) -> (Arc<TopologyStore>, Arc<ForwarderRegistry>, Vec<Arc<NodeForwarder>>) {
        let store = Arc::new(TopologyStore::new());
        let registry = Arc::new(ForwarderRegistry::new());
        let labels = ["A", "B", "C", "D"];
        let mut fws = Vec::new();
        for label in labels.iter().take(n) {
            let id = NodeId::from(label.to_lowercase().as_str());
            store.add_node(Node::new(id.clone(), *label));
            let config = ForwarderConfig {
                latency_slowdown: 1,
                ..ForwarderConfig::default()
            };
            let fw = NodeForwarder::new(id, store.clone(), registry.clone(), config);
            registry.insert(fw.clone());
            fws.push(fw);
        }
        (store, registry, fws)
    }

    fn link(store: &TopologyStore, id: &str, from: &str, to: &str, latency: i32) {
        let mut edge = Edge::new(id.into(), from.into(), to.into());
        edge.latency_ms = latency;
        store.add_edge(edge);
    }

    fn echo_producer() -> ProducerFn {
        Arc::new(|interest: Interest| {
            async move {
                Some(Data::new(interest.name.clone(), Bytes::from_static(b"pong")))
            }
            .boxed()
        })
    }

    #[tokio::test]
    async fn test_local_producer_answers() {
        let (_store, _registry, fws) = setup(1);
        fws[0].register_producer("/ndn/A".parse().unwrap(), echo_producer());

        let data = fws[0]
            .express_interest(Interest::new("/ndn/A/hello".parse().unwrap()))
            .await
            .unwrap();
        assert_eq!(data.name.to_string(), "/ndn/A/hello");
    }

    #[tokio::test]
    async fn test_forward_one_hop() {
        let (store, _registry, fws) = setup(2);
        link(&store, "ab", "a", "b", 1);
        fws[1].register_producer("/ndn/B".parse().unwrap(), echo_producer());
        fws[0].set_fib(vec![FibEntry::new(
            "/ndn/B".parse().unwrap(),
            "b".into(),
            1,
        )]);

        let data = fws[0]
            .express_interest(Interest::new("/ndn/B/x".parse().unwrap()))
            .await
            .unwrap();
        assert_eq!(data.name.to_string(), "/ndn/B/x");
    }

    #[tokio::test]
    async fn test_no_route_reported() {
        let (_store, _registry, fws) = setup(1);
        let err = fws[0]
            .express_interest(Interest::new("/ndn/Z/x".parse().unwrap()))
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::NoRoute(_)));
    }

    #[tokio::test]
    async fn test_second_request_served_from_cs() {
        let (store, _registry, fws) = setup(2);
        link(&store, "ab", "a", "b", 1);
        fws[1].register_producer("/ndn/B".parse().unwrap(), echo_producer());
        fws[0].set_fib(vec![FibEntry::new(
            "/ndn/B".parse().unwrap(),
            "b".into(),
            1,
        )]);

        fws[0]
            .express_interest(Interest::new("/ndn/B/x".parse().unwrap()))
            .await
            .unwrap();

        // Tear the link down; only the CS can answer now
        store.remove_edge(&"ab".into());
        let data = fws[0]
            .express_interest(Interest::new("/ndn/B/x".parse().unwrap()))
            .await
            .unwrap();
        assert_eq!(data.content, Bytes::from_static(b"pong"));
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let (store, _registry, fws) = setup(3);
        link(&store, "ab", "a", "b", 1);
        link(&store, "ac", "a", "c", 1);
        fws[1].register_producer("/ndn/svc".parse().unwrap(), echo_producer());
        fws[2].register_producer("/ndn/svc/special".parse().unwrap(), Arc::new(|i: Interest| {
            async move { Some(Data::new(i.name.clone(), Bytes::from_static(b"special"))) }.boxed()
        }));
        fws[0].set_fib(vec![
            FibEntry::new("/ndn/svc".parse().unwrap(), "b".into(), 1),
            FibEntry::new("/ndn/svc/special".parse().unwrap(), "c".into(), 5),
        ]);

        let data = fws[0]
            .express_interest(Interest::new("/ndn/svc/special/x".parse().unwrap()))
            .await
            .unwrap();
        assert_eq!(data.content, Bytes::from_static(b"special"));
    }

    #[tokio::test]
    async fn test_multicast_reaches_producer_on_worse_path() {
        let (store, _registry, fws) = setup(3);
        link(&store, "ab", "a", "b", 1);
        link(&store, "ac", "a", "c", 1);
        // Only C produces under the multicast prefix; B is the cheaper hop
        // but has nothing to say
        fws[2].register_producer("/ndn/multicast/test".parse().unwrap(), echo_producer());
        fws[0].set_fib(vec![
            FibEntry::new("/ndn/multicast/test".parse().unwrap(), "b".into(), 1),
            FibEntry::new("/ndn/multicast/test".parse().unwrap(), "c".into(), 5),
        ]);

        let data = fws[0]
            .express_interest(
                Interest::new("/ndn/multicast/test/q".parse().unwrap()).with_lifetime(1000),
            )
            .await
            .unwrap();
        assert_eq!(data.name.to_string(), "/ndn/multicast/test/q");
    }

    #[tokio::test]
    async fn test_interest_not_sent_back_to_sender() {
        // a - b, and b's FIB points back at a; the interest must die at b
        // instead of ping-ponging
        let (store, _registry, fws) = setup(2);
        link(&store, "ab", "a", "b", 1);
        fws[0].set_fib(vec![FibEntry::new("/ndn/Z".parse().unwrap(), "b".into(), 1)]);
        fws[1].set_fib(vec![FibEntry::new("/ndn/Z".parse().unwrap(), "a".into(), 1)]);

        let err = fws[0]
            .express_interest(Interest::new("/ndn/Z/x".parse().unwrap()).with_lifetime(300))
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::NoRoute(_) | SendError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_capture_records_packets() {
        let (store, _registry, fws) = setup(1);
        store.update_node(&"a".into(), |n| n.state.capture_enabled = true);
        fws[0].register_producer("/ndn/A".parse().unwrap(), echo_producer());

        fws[0]
            .express_interest(Interest::new("/ndn/A/x".parse().unwrap()))
            .await
            .unwrap();

        let node = store.node(&"a".into()).unwrap();
        let kinds: Vec<&str> = node
            .state
            .captured_packets
            .iter()
            .map(|p| p.kind.as_str())
            .collect();
        assert_eq!(kinds, vec!["Interest", "Data"]);
    }

    #[tokio::test]
    async fn test_transit_counters_reset_when_losing_branch_dropped() {
        // Multicast races b (fast, answers) against c (slow, cancelled when
        // b's Data wins); the cancelled branch must still release its
        // counters
        let (store, _registry, fws) = setup(3);
        link(&store, "ab", "a", "b", 1);
        link(&store, "ac", "a", "c", 200);
        fws[1].register_producer("/ndn/multicast/test".parse().unwrap(), echo_producer());
        fws[0].set_fib(vec![
            FibEntry::new("/ndn/multicast/test".parse().unwrap(), "b".into(), 1),
            FibEntry::new("/ndn/multicast/test".parse().unwrap(), "c".into(), 200),
        ]);

        fws[0]
            .express_interest(
                Interest::new("/ndn/multicast/test/q".parse().unwrap()).with_lifetime(1000),
            )
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.edge(&"ac".into()).unwrap().pending_traffic, 0);
        assert_eq!(store.edge(&"ab".into()).unwrap().pending_traffic, 0);
        assert_eq!(store.node(&"c".into()).unwrap().state.pending_traffic, 0);
    }

    #[tokio::test]
    async fn test_dropped_pipeline_leaves_no_pending_interest() {
        let (store, _registry, fws) = setup(2);
        link(&store, "ab", "a", "b", 100);
        fws[0].set_fib(vec![FibEntry::new(
            "/ndn/B".parse().unwrap(),
            "b".into(),
            100,
        )]);

        let task = tokio::spawn(
            fws[0]
                .clone()
                .handle_interest(Interest::new("/ndn/B/x".parse().unwrap()), None),
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(fws[0].pending_interests(), 1);

        task.abort();
        let _ = task.await;
        assert_eq!(fws[0].pending_interests(), 0);
        assert_eq!(store.edge(&"ab".into()).unwrap().pending_traffic, 0);
    }
}
