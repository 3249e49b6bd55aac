//! Packet encoding error types.

use thiserror::Error;

/// Packet encoding/decoding errors
#[derive(Error, Debug)]
pub enum WireError {
    /// Incomplete element (need more data)
    #[error("incomplete element")]
    Incomplete,

    /// Unknown top-level packet type
    #[error("unknown packet type {0}")]
    Type(u64),

    /// Missing required field
    #[error("missing {0}")]
    MissingField(&'static str),

    /// Field value out of range
    #[error("field {0} out of range")]
    Range(&'static str),

    /// Invalid name component
    #[error("invalid name component")]
    Component,

    /// Name URI could not be parsed
    #[error("invalid name uri: {0}")]
    Uri(String),

    /// Trailing bytes after a complete element
    #[error("trailing bytes after element")]
    Trailing,
}
