//! NDN network simulator binary.
//!
//! Runs the simulation core headless: seeds a topology (built-in demo or a
//! YAML file), brings a forwarder up on every node, keeps routes fresh as
//! the topology changes, and optionally pings between two nodes so packet
//! flow is visible in the logs.

use anyhow::Context;
use clap::Parser;
use ndn_control::{SimulationController, TrustAllSecurity};
use ndn_topology::{Edge, EdgeId, Node, NodeId, TopologyStore};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod logging;

use config::SimConfig;
use logging::SimLogFormatter;

/// NDN topology simulator
#[derive(Parser, Debug)]
#[command(name = "ndn-sim", version, about = "Headless NDN network simulator")]
struct Args {
    /// Configuration file path
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Topology file (YAML); overrides the built-in demo topology
    #[arg(long)]
    topology: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Node label to ping from (repeating ping when both ends are set)
    #[arg(long)]
    ping_from: Option<String>,

    /// Node label to ping to
    #[arg(long)]
    ping_to: Option<String>,

    /// Interval between pings, e.g. 5s
    #[arg(long, default_value = "5s")]
    ping_interval: humantime::Duration,
}

/// YAML topology description
#[derive(Debug, Deserialize)]
struct TopologyFile {
    nodes: Vec<TopologyNode>,
    #[serde(default)]
    edges: Vec<TopologyEdge>,
}

#[derive(Debug, Deserialize)]
struct TopologyNode {
    id: String,
    label: String,
}

#[derive(Debug, Deserialize)]
struct TopologyEdge {
    from: String,
    to: String,
    #[serde(default = "default_sentinel_latency")]
    latency_ms: i32,
    #[serde(default = "default_sentinel_loss")]
    loss_pct: f32,
}

fn default_sentinel_latency() -> i32 {
    -1
}

fn default_sentinel_loss() -> f32 {
    -1.0
}

fn seed_from_file(store: &TopologyStore, path: &PathBuf) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading topology file {:?}", path))?;
    let topology: TopologyFile =
        serde_yaml::from_str(&content).with_context(|| format!("parsing {:?}", path))?;

    for node in &topology.nodes {
        store.add_node(Node::new(NodeId::new(&node.id), &node.label));
    }
    for edge in &topology.edges {
        let id = EdgeId::new(format!("{}-{}", edge.from, edge.to));
        let mut record = Edge::new(id, NodeId::new(&edge.from), NodeId::new(&edge.to));
        record.latency_ms = edge.latency_ms;
        record.loss_pct = edge.loss_pct;
        store.add_edge(record);
    }
    info!(
        "Loaded topology from {:?}: {} nodes, {} edges",
        path,
        topology.nodes.len(),
        topology.edges.len()
    );
    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::new("info")
        .add_directive(format!("ndn_sim={}", args.log_level).parse()?)
        .add_directive(format!("ndn_wire={}", args.log_level).parse()?)
        .add_directive(format!("ndn_topology={}", args.log_level).parse()?)
        .add_directive(format!("ndn_routing={}", args.log_level).parse()?)
        .add_directive(format!("ndn_forwarder={}", args.log_level).parse()?)
        .add_directive(format!("ndn_control={}", args.log_level).parse()?);

    let formatter = SimLogFormatter::new("ndn-sim");

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(true)
        .event_format(formatter)
        .init();

    info!("Starting NDN simulator v{}", env!("CARGO_PKG_VERSION"));

    let mut sim_config = SimConfig::load_from_file(&args.config)?;
    if args.topology.is_some() {
        sim_config.seed_demo_topology = false;
    }

    let store = Arc::new(TopologyStore::new());
    if let Some(path) = &args.topology {
        seed_from_file(&store, path)?;
    }

    let controller = SimulationController::new(
        store.clone(),
        sim_config.controller_config(),
        Arc::new(TrustAllSecurity),
    );
    controller.initialize();
    let watcher = controller.initialize_post_network();

    component_info!(
        "control",
        "Simulation up: {} nodes, {} edges",
        store.node_count(),
        store.edge_count()
    );

    // Periodic ping between two labels, when both are given
    let ping_task = match (&args.ping_from, &args.ping_to) {
        (Some(from_label), Some(to_label)) => {
            let from = store
                .node_by_label(from_label)
                .with_context(|| format!("no node labeled {}", from_label))?
                .id;
            let to = store
                .node_by_label(to_label)
                .with_context(|| format!("no node labeled {}", to_label))?
                .id;
            let controller = controller.clone();
            let interval = Duration::from(args.ping_interval);

            Some(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                loop {
                    ticker.tick().await;
                    match controller.send_ping_interest(&from, &to).await {
                        Ok(rtt) => {
                            component_info!(
                                "ping",
                                "{} -> {}: {} ms",
                                from,
                                to,
                                rtt.as_millis()
                            )
                        }
                        Err(e) => component_warn!("ping", "{} -> {}: {}", from, to, e),
                    }
                }
            }))
        }
        (None, None) => None,
        _ => {
            warn!("Both --ping-from and --ping-to are needed for pings; ignoring");
            None
        }
    };

    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to install SIGTERM handler: {}", e))?;
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to install SIGINT handler: {}", e))?;

    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("Received SIGINT, shutting down"),
    }

    if let Some(task) = ping_task {
        task.abort();
    }
    watcher.abort();

    info!("Simulator shutdown complete");
    Ok(())
}
