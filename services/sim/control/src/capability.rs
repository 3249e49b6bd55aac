//! Narrow capability traits over the controller.
//!
//! Embedders that only need one user operation take the matching trait
//! object instead of the whole controller.

use crate::error::ControlError;
use crate::provider::SimulationController;
use crate::script::NodeScript;
use async_trait::async_trait;
use ndn_topology::NodeId;
use ndn_wire::Data;
use std::time::Duration;

/// Can ping one node from another
#[async_trait]
pub trait PingSender: Send + Sync {
    /// Ping `to` from `from`, returning the round-trip time
    async fn send_ping_interest(&self, from: &NodeId, to: &NodeId)
        -> Result<Duration, ControlError>;
}

/// Can express a user-typed Interest from a node
#[async_trait]
pub trait InterestSender: Send + Sync {
    /// Express `name` (with `$time` substitution) from `node`
    async fn send_interest(&self, name: &str, node: &NodeId) -> Result<Data, ControlError>;
}

/// Can run a script against a node
pub trait CodeRunner: Send + Sync {
    /// Launch `script` on `node`; failures inside the script are logged
    fn run_code(&self, node: &NodeId, script: NodeScript) -> Result<(), ControlError>;
}

#[async_trait]
impl PingSender for SimulationController {
    async fn send_ping_interest(
        &self,
        from: &NodeId,
        to: &NodeId,
    ) -> Result<Duration, ControlError> {
        SimulationController::send_ping_interest(self, from, to).await
    }
}

#[async_trait]
impl InterestSender for SimulationController {
    async fn send_interest(&self, name: &str, node: &NodeId) -> Result<Data, ControlError> {
        SimulationController::send_interest(self, name, node).await
    }
}

impl CodeRunner for SimulationController {
    fn run_code(&self, node: &NodeId, script: NodeScript) -> Result<(), ControlError> {
        SimulationController::run_code(self, node, script)
    }
}
