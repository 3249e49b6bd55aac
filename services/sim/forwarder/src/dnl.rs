//! Dead Nonce List for Interest loop suppression.

use dashmap::DashMap;
use ndn_wire::Interest;
use std::time::{Duration, Instant};

/// How long a (name, nonce) pair stays on the list
const DNL_LIFETIME: Duration = Duration::from_secs(6);

/// Recently seen (name, nonce) pairs.
///
/// A looping Interest comes back with the same nonce and is dropped here
/// before it can circulate again.
#[derive(Default)]
pub struct DeadNonceList {
    seen: DashMap<(String, u32), Instant>,
}

impl DeadNonceList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an Interest; returns false if this (name, nonce) was already
    /// seen recently, meaning the Interest is a duplicate or a loop
    pub fn observe(&self, interest: &Interest) -> bool {
        self.prune();
        let key = (interest.name.to_string(), interest.nonce);
        let now = Instant::now();
        match self.seen.insert(key, now) {
            Some(previous) => now.duration_since(previous) >= DNL_LIFETIME,
            None => true,
        }
    }

    fn prune(&self) {
        self.seen
            .retain(|_, inserted| inserted.elapsed() < DNL_LIFETIME);
    }
}
