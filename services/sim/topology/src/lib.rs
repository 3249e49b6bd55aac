//! Observable node/edge topology store for the simulated NDN network.
//!
//! This crate owns the ground-truth graph: id-keyed node and edge records,
//! mutation operations, change events for downstream listeners, and
//! consistent snapshots for route computation.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod store;

pub use graph::{CapturedPacket, Edge, EdgeId, GraphSnapshot, Node, NodeId, NodeState};
pub use store::{TopologyEvent, TopologyStore, EVENT_CHANNEL_CAPACITY};
