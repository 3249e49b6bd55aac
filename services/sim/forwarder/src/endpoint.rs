//! Application face of a node's forwarder.

use crate::error::SendError;
use crate::nfw::{NodeForwarder, ProducerFn};
use ndn_topology::NodeId;
use ndn_wire::{Data, Interest, Name};
use std::sync::Arc;

/// Cheap cloneable handle for expressing Interests and registering
/// producers on one node
#[derive(Clone)]
pub struct Endpoint {
    fw: Arc<NodeForwarder>,
}

impl Endpoint {
    /// Wrap a forwarder
    pub fn new(fw: Arc<NodeForwarder>) -> Self {
        Self { fw }
    }

    /// The node this endpoint fronts
    pub fn node_id(&self) -> &NodeId {
        self.fw.node_id()
    }

    /// Express an Interest for a name with default options
    pub async fn consume(&self, name: Name) -> Result<Data, SendError> {
        self.consume_interest(Interest::new(name)).await
    }

    /// Express a fully specified Interest
    pub async fn consume_interest(&self, interest: Interest) -> Result<Data, SendError> {
        self.fw.express_interest(interest).await
    }

    /// Register a producer under a prefix; the prefix is advertised and
    /// picked up on the next route refresh
    pub fn produce(&self, prefix: Name, handler: ProducerFn) {
        self.fw.register_producer(prefix, handler);
    }
}
