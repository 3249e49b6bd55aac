//! Forwarder error types.

use thiserror::Error;

/// Why an expressed Interest did not bring a Data back
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// Interest lifetime elapsed without a Data arriving
    #[error("interest timed out after {0} ms")]
    Timeout(u64),

    /// No FIB entry, local producer, or cached Data matched the name
    #[error("no route for {0}")]
    NoRoute(String),
}
