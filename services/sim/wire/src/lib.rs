//! NDN packet layer: names, Interest/Data packets, and TLV encoding.
//!
//! This crate provides the packet-level building blocks for the simulated
//! NDN network: hierarchical names, Interest and Data packets, and the
//! Type-Length-Value encoding they travel in.
//!
//! ## Wire Format
//!
//! Every packet is one TLV element whose value nests further TLVs:
//!
//! ```text
//! +----------------------+----------------------------+
//! | varnum type          | 0x05 Interest / 0x06 Data  |
//! +----------------------+----------------------------+
//! | varnum length        | length of bytes that follow|
//! +----------------------+----------------------------+
//! | Name (0x07)          | sequence of components     |
//! +----------------------+----------------------------+
//! | per-packet fields    | nonce, lifetime, content...|
//! +----------------------+----------------------------+
//! ```
//!
//! Numbers use the NDN variable-size encoding: one byte below 253, otherwise
//! a marker byte (0xFD/0xFE) followed by a big-endian u16/u32.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod name;
pub mod packet;
pub mod tlv;

// Re-export main types
pub use error::WireError;
pub use name::{Component, Name};
pub use packet::{
    Data, Interest, InterestFlags, DEFAULT_HOP_LIMIT, DEFAULT_INTEREST_LIFETIME_MS,
};
pub use tlv::{read_tlv, read_varnum, write_tlv, write_varnum, Tlv, TlvType};
