//! Per-node NDN forwarding plane.
//!
//! Every topology node gets a [`NodeForwarder`] holding a Content Store,
//! Pending Interest Table, Dead Nonce List, FIB and strategy table.
//! Forwarders reach each other through the shared [`ForwarderRegistry`];
//! link transit is simulated with real sleeps scaled by a slowdown factor
//! so packet flow is observable in wall-clock time.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cs;
pub mod dnl;
pub mod endpoint;
pub mod error;
pub mod nfw;
pub mod pit;
pub mod servers;

pub use cs::{ContentStore, DEFAULT_CS_CAPACITY};
pub use dnl::DeadNonceList;
pub use endpoint::Endpoint;
pub use error::SendError;
pub use nfw::{
    ForwarderConfig, ForwarderRegistry, NodeForwarder, ProducerFn, Strategy,
    DEFAULT_LATENCY_SLOWDOWN,
};
pub use pit::{Pit, PitGuard, PitKey, PitRole};
pub use servers::DefaultServers;
