//! Bounded in-memory Content Store.

use ndn_wire::{Data, Interest, InterestFlags};
use std::collections::VecDeque;
use std::time::Instant;

/// Default Content Store capacity, in packets
pub const DEFAULT_CS_CAPACITY: usize = 500;

struct CsEntry {
    data: Data,
    inserted_at: Instant,
}

impl CsEntry {
    fn is_fresh(&self) -> bool {
        if self.data.freshness_ms == 0 {
            return false;
        }
        self.inserted_at.elapsed().as_millis() < u128::from(self.data.freshness_ms)
    }
}

/// FIFO-evicting cache of Data packets.
///
/// Newest entries are matched first, so a refreshed Data shadows its stale
/// predecessor until the old one rotates out.
pub struct ContentStore {
    entries: VecDeque<CsEntry>,
    capacity: usize,
}

impl ContentStore {
    /// Create a store that holds at most `capacity` packets
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity: capacity.max(1),
        }
    }

    /// Number of cached packets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cache a Data packet, evicting the oldest entry when full
    pub fn insert(&mut self, data: Data) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(CsEntry {
            data,
            inserted_at: Instant::now(),
        });
    }

    /// Find a cached Data satisfying the Interest, honoring MustBeFresh
    pub fn lookup(&self, interest: &Interest) -> Option<Data> {
        let must_be_fresh = interest.flags.contains(InterestFlags::MUST_BE_FRESH);
        self.entries
            .iter()
            .find(|entry| {
                entry.data.can_satisfy(interest) && (!must_be_fresh || entry.is_fresh())
            })
            .map(|entry| entry.data.clone())
    }

    /// Drop all cached packets
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use ndn_wire::Name;

    fn data(uri: &str) -> Data {
        Data::new(uri.parse::<Name>().unwrap(), Bytes::from_static(b"x"))
    }

    fn interest(uri: &str) -> Interest {
        Interest::new(uri.parse::<Name>().unwrap())
    }

    #[test]
    fn test_exact_match() {
        let mut cs = ContentStore::new(10);
        cs.insert(data("/ndn/A/1"));

        assert!(cs.lookup(&interest("/ndn/A/1")).is_some());
        assert!(cs.lookup(&interest("/ndn/A")).is_none());
    }

    #[test]
    fn test_prefix_match() {
        let mut cs = ContentStore::new(10);
        cs.insert(data("/ndn/A/1"));

        let probe = interest("/ndn/A").with_flags(InterestFlags::CAN_BE_PREFIX);
        assert!(cs.lookup(&probe).is_some());
    }

    #[test]
    fn test_eviction_order() {
        let mut cs = ContentStore::new(2);
        cs.insert(data("/a"));
        cs.insert(data("/b"));
        cs.insert(data("/c"));

        assert_eq!(cs.len(), 2);
        assert!(cs.lookup(&interest("/a")).is_none());
        assert!(cs.lookup(&interest("/b")).is_some());
        assert!(cs.lookup(&interest("/c")).is_some());
    }

    #[test]
    fn test_must_be_fresh_skips_stale() {
        let mut cs = ContentStore::new(10);
        // freshness 0 means never fresh
        cs.insert(data("/ndn/A/ping"));

        let probe = interest("/ndn/A/ping").with_flags(InterestFlags::MUST_BE_FRESH);
        assert!(cs.lookup(&probe).is_none());
        assert!(cs.lookup(&interest("/ndn/A/ping")).is_some());
    }
}
