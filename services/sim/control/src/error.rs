//! Controller error types.

use ndn_forwarder::SendError;
use ndn_wire::WireError;
use thiserror::Error;

/// Errors from controller-level operations
#[derive(Error, Debug)]
pub enum ControlError {
    /// The operation named a node the store does not know
    #[error("unknown node {0}")]
    UnknownNode(String),

    /// A name string failed to parse
    #[error(transparent)]
    Name(#[from] WireError),

    /// Expressing the Interest failed
    #[error(transparent)]
    Send(#[from] SendError),
}
