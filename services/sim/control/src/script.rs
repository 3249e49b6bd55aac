//! User scripting hook.
//!
//! Scripts are async closures handed a narrow [`ScriptHandle`] instead of
//! the whole simulation, so a script can express Interests and register
//! producers on its node but cannot reach into other nodes or the store.

use futures::future::BoxFuture;
use ndn_forwarder::{Endpoint, ProducerFn, SendError};
use ndn_topology::NodeId;
use ndn_wire::{Data, Interest, Name};

/// An async user script bound to one node
pub type NodeScript =
    Box<dyn FnOnce(ScriptHandle) -> BoxFuture<'static, anyhow::Result<()>> + Send>;

/// What a script may do on its node
#[derive(Clone)]
pub struct ScriptHandle {
    node_id: NodeId,
    label: String,
    endpoint: Endpoint,
}

impl ScriptHandle {
    pub(crate) fn new(node_id: NodeId, label: String, endpoint: Endpoint) -> Self {
        Self {
            node_id,
            label,
            endpoint,
        }
    }

    /// Id of the node the script runs on
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Display label of the node
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Express an Interest from this node
    pub async fn consume(&self, name: Name) -> Result<Data, SendError> {
        self.endpoint.consume(name).await
    }

    /// Express a fully specified Interest from this node
    pub async fn consume_interest(&self, interest: Interest) -> Result<Data, SendError> {
        self.endpoint.consume_interest(interest).await
    }

    /// Register a producer on this node
    pub fn produce(&self, prefix: Name, handler: ProducerFn) {
        self.endpoint.produce(prefix, handler);
    }
}
