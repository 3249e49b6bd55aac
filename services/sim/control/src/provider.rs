//! The simulation controller.

use crate::error::ControlError;
use crate::scheduler::{RefreshScheduler, DEFAULT_REFRESH_DEBOUNCE};
use crate::script::{NodeScript, ScriptHandle};
use crate::security::SecurityObserver;
use dashmap::DashMap;
use ndn_forwarder::{
    DefaultServers, Endpoint, ForwarderConfig, ForwarderRegistry, NodeForwarder,
};
use ndn_routing::{RoutingHelper, DEFAULT_MAX_ROUTES};
use ndn_topology::{Edge, EdgeId, Node, NodeId, TopologyEvent, TopologyStore};
use ndn_wire::{Data, Interest, Name};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Lifetime for user-triggered Interests (pings and manual sends)
pub const USER_INTEREST_LIFETIME_MS: u64 = 3000;

/// Prefix every node advertises so multicast has a shared destination
const MULTICAST_TEST_PREFIX: &str = "/ndn/multicast/test";

/// Controller tuning
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Knobs shared by every node forwarder
    pub forwarder: ForwarderConfig,
    /// Debounce window for route refreshes
    pub debounce: Duration,
    /// Alternative paths computed per destination
    pub max_routes: usize,
    /// Seed the built-in demo topology when the store starts empty
    pub seed_demo_topology: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            forwarder: ForwarderConfig::default(),
            debounce: DEFAULT_REFRESH_DEBOUNCE,
            max_routes: DEFAULT_MAX_ROUTES,
            seed_demo_topology: true,
        }
    }
}

/// Owns simulation lifecycle: forwarder creation for topology nodes,
/// debounced route recomputation, and the user-facing operations (ping,
/// manual Interests, scripts).
pub struct SimulationController {
    store: Arc<TopologyStore>,
    registry: Arc<ForwarderRegistry>,
    config: ControllerConfig,
    scheduler: Arc<RefreshScheduler>,
    security: Arc<dyn SecurityObserver>,
    servers: DashMap<NodeId, DefaultServers>,
}

impl SimulationController {
    /// Create a controller over a store
    pub fn new(
        store: Arc<TopologyStore>,
        config: ControllerConfig,
        security: Arc<dyn SecurityObserver>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let scheduler = RefreshScheduler::new(
                config.debounce,
                Arc::new(move || {
                    if let Some(controller) = weak.upgrade() {
                        controller.compute_routes();
                    }
                }),
            );
            Self {
                store,
                registry: Arc::new(ForwarderRegistry::new()),
                config,
                scheduler,
                security,
                servers: DashMap::new(),
            }
        })
    }

    /// The shared forwarder registry
    pub fn registry(&self) -> &Arc<ForwarderRegistry> {
        &self.registry
    }

    /// Seed the demo topology if the store is empty, bring every node's
    /// forwarder up and compute initial routes.
    ///
    /// Safe to call more than once; nodes that already have a forwarder
    /// are left alone.
    pub fn initialize(&self) {
        if self.store.is_empty() && self.config.seed_demo_topology {
            self.seed_demo_topology();
        }
        self.ensure_initialized();
        self.compute_routes();
    }

    /// Start reacting to topology changes.
    ///
    /// A single task consumes store events in emission order: new nodes get
    /// forwarders, removed nodes lose theirs, and every change schedules a
    /// debounced route refresh.
    pub fn initialize_post_network(self: &Arc<Self>) -> JoinHandle<()> {
        let this = self.clone();
        let mut events = self.store.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => this.handle_event(event),
                    Err(RecvError::Lagged(missed)) => {
                        warn!("Topology event stream lagged, missed {}", missed);
                        this.ensure_initialized();
                        this.schedule_route_refresh();
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    fn handle_event(&self, event: TopologyEvent) {
        match event {
            TopologyEvent::NodeAdded(_) => self.ensure_initialized(),
            TopologyEvent::NodeRemoved(id) => {
                self.registry.remove(&id);
                self.servers.remove(&id);
            }
            TopologyEvent::EdgeAdded(_) | TopologyEvent::EdgeRemoved(_) => {}
        }
        self.schedule_route_refresh();
    }

    /// An edge's parameters changed
    pub fn edge_updated(&self, _edge: Option<&EdgeId>) {
        self.schedule_route_refresh();
    }

    /// A node's record changed: recompute trust, then let the node's
    /// forwarder react and bring its default servers back up under the
    /// current label
    pub fn node_updated(&self, node: Option<&NodeId>) {
        self.security.compute_security(&self.store);

        if let Some(id) = node {
            match (self.registry.get(id), self.store.node(id)) {
                (Some(fw), Some(record)) => {
                    fw.node_updated();
                    let servers = DefaultServers::install(fw, &record.label);
                    self.servers.insert(id.clone(), servers);
                }
                _ => {
                    // An initialized node always has a forwarder
                    debug_assert!(false, "update for node without forwarder");
                    error!("Update for node {} with no forwarder", id);
                }
            }
        }
    }

    /// Clicking empty canvas does nothing; kept as an explicit hook
    pub fn on_network_click(&self) {}

    /// Request a debounced route refresh
    pub fn schedule_route_refresh(&self) {
        self.scheduler.schedule();
    }

    /// Whether a route refresh is pending
    pub fn refresh_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Recompute all FIBs from the current topology, synchronously.
    ///
    /// Every node's FIB is replaced wholesale and its display summary
    /// regenerated.
    pub fn compute_routes(&self) {
        info!("Computing routes");
        let helper = RoutingHelper::new(
            self.store.snapshot(),
            self.config.forwarder.defaults,
            self.config.max_routes,
        );
        for (node_id, entries) in helper.calculate_n_possible_routes() {
            let Some(fw) = self.registry.get(&node_id) else {
                continue;
            };
            fw.set_fib(entries);
            let summary = fw.strs_fib().join("\n");
            self.store.update_node(&node_id, |node| {
                node.state.fib_summary = summary.clone();
            });
        }
    }

    /// Ping `to` from `from` and return the round-trip time
    pub async fn send_ping_interest(
        &self,
        from: &NodeId,
        to: &NodeId,
    ) -> Result<Duration, ControlError> {
        let target = self
            .store
            .node(to)
            .ok_or_else(|| ControlError::UnknownNode(to.to_string()))?;
        let name: Name = format!(
            "/ndn/{}/ping/{}",
            target.label,
            chrono::Utc::now().timestamp_millis()
        )
        .parse()?;

        let endpoint = self.endpoint(from)?;
        let start = Instant::now();
        endpoint
            .consume_interest(Interest::new(name).with_lifetime(USER_INTEREST_LIFETIME_MS))
            .await?;
        let rtt = start.elapsed();
        info!("Received ping reply in {} ms", rtt.as_millis());
        Ok(rtt)
    }

    /// Express a user-typed Interest from a node.
    ///
    /// `$time` in the name is replaced with the current epoch milliseconds.
    pub async fn send_interest(&self, name: &str, node: &NodeId) -> Result<Data, ControlError> {
        let name = name.replace("$time", &chrono::Utc::now().timestamp_millis().to_string());
        let name: Name = name.parse()?;

        let endpoint = self.endpoint(node)?;
        let data = endpoint
            .consume_interest(Interest::new(name).with_lifetime(USER_INTEREST_LIFETIME_MS))
            .await?;
        info!("Received data reply");
        Ok(data)
    }

    /// Run a user script against a node.
    ///
    /// The script gets a handle scoped to that node and runs detached;
    /// failures are logged, not returned.
    pub fn run_code(&self, node: &NodeId, script: NodeScript) -> Result<(), ControlError> {
        let record = self
            .store
            .node(node)
            .ok_or_else(|| ControlError::UnknownNode(node.to_string()))?;
        let handle = ScriptHandle::new(node.clone(), record.label, self.endpoint(node)?);

        let node = node.clone();
        tokio::spawn(async move {
            if let Err(err) = script(handle).await {
                error!("Script on node {} failed: {:#}", node, err);
            }
        });
        Ok(())
    }

    /// Application face for a node
    pub fn endpoint(&self, node: &NodeId) -> Result<Endpoint, ControlError> {
        self.registry
            .get(node)
            .map(Endpoint::new)
            .ok_or_else(|| ControlError::UnknownNode(node.to_string()))
    }

    /// Give every store node a forwarder and default servers
    fn ensure_initialized(&self) {
        for id in self.store.node_ids() {
            if self.registry.contains(&id) {
                continue;
            }
            let Some(record) = self.store.node(&id) else {
                continue;
            };

            let fw = NodeForwarder::new(
                id.clone(),
                self.store.clone(),
                self.registry.clone(),
                self.config.forwarder.clone(),
            );
            self.registry.insert(fw.clone());

            self.store.update_node(&id, |node| {
                let prefix = Name::root().append("ndn").append("multicast").append("test");
                if !node.state.produced_prefixes.contains(&prefix) {
                    node.state.produced_prefixes.push(prefix);
                }
            });

            let servers = DefaultServers::install(fw, &record.label);
            self.servers.insert(id.clone(), servers);
            debug!("Forwarder up for node {} ({})", id, record.label);
        }
    }

    fn seed_demo_topology(&self) {
        let nodes = [
            ("1", "A"),
            ("2", "M"),
            ("3", "E"),
            ("4", "B"),
            ("5", "C"),
            ("d1", "D"),
            ("d2", "D"),
            ("d3", "D"),
            ("d4", "D"),
        ];
        for (id, label) in nodes {
            self.store.add_node(Node::new(id.into(), label));
        }

        let edges = [
            ("1", "3"),
            ("1", "2"),
            ("2", "4"),
            ("2", "5"),
            ("3", "d3"),
            ("d3", "d2"),
            ("d3", "d1"),
            ("d1", "d4"),
            ("d4", "1"),
        ];
        for (from, to) in edges {
            let id = EdgeId::new(format!("{}-{}", from, to));
            self.store.add_edge(Edge::new(id, from.into(), to.into()));
        }
        info!("Seeded demo topology: {} nodes", nodes.len());
    }
}
