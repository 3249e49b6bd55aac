//! Multi-path route computation over topology snapshots.
//!
//! Given a consistent graph snapshot, derive for every node an ordered list
//! of next-hop candidates per reachable producer prefix. Output ordering is
//! deterministic for a fixed snapshot so FIB summaries are stable and
//! testable.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fib;
pub mod helper;

pub use fib::{FibEntry, RouteDefaults, DEFAULT_MAX_ROUTES};
pub use helper::RoutingHelper;
