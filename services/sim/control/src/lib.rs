//! Simulation lifecycle and user operations.
//!
//! The [`SimulationController`] wires the topology store, per-node
//! forwarders and route computation together: it seeds the demo topology,
//! creates forwarders as nodes appear, debounces route refreshes behind a
//! fixed window, and exposes the user-triggered operations (ping, manual
//! Interests, node scripts).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capability;
pub mod error;
pub mod provider;
pub mod scheduler;
pub mod script;
pub mod security;

pub use capability::{CodeRunner, InterestSender, PingSender};
pub use error::ControlError;
pub use provider::{ControllerConfig, SimulationController, USER_INTEREST_LIFETIME_MS};
pub use scheduler::{RefreshScheduler, DEFAULT_REFRESH_DEBOUNCE};
pub use script::{NodeScript, ScriptHandle};
pub use security::{SecurityObserver, TrustAllSecurity};
