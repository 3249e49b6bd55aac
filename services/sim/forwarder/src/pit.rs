//! Pending Interest Table with aggregation.

use dashmap::DashMap;
use ndn_wire::{Data, Interest, InterestFlags};
use ndn_wire::Name;
use tokio::sync::oneshot;

/// Interests are aggregated on name plus the prefix-match flag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PitKey {
    name: Name,
    can_be_prefix: bool,
}

impl PitKey {
    /// Aggregation key for an Interest
    pub fn of(interest: &Interest) -> Self {
        Self {
            name: interest.name.clone(),
            can_be_prefix: interest.flags.contains(InterestFlags::CAN_BE_PREFIX),
        }
    }
}

/// What the caller must do after registering an Interest
#[derive(Debug, PartialEq, Eq)]
pub enum PitRole {
    /// First Interest for this key; the caller forwards it upstream
    Forward,
    /// An identical Interest is already in flight; just await the result
    Aggregate,
}

/// Pending Interest Table.
///
/// The first registration for a key forwards; later identical Interests
/// piggyback on the in-flight one. A returning Data satisfies every entry
/// it can answer.
#[derive(Default)]
pub struct Pit {
    entries: DashMap<PitKey, Vec<oneshot::Sender<Data>>>,
}

impl Pit {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct pending keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register an Interest; the receiver resolves when a Data answers it
    pub fn register(&self, interest: &Interest) -> (PitRole, oneshot::Receiver<Data>) {
        let (tx, rx) = oneshot::channel();
        let mut entry = self.entries.entry(PitKey::of(interest)).or_default();
        let role = if entry.is_empty() {
            PitRole::Forward
        } else {
            PitRole::Aggregate
        };
        entry.push(tx);
        (role, rx)
    }

    /// Deliver a Data to every pending entry it satisfies; returns how many
    /// entries were consumed
    pub fn satisfy(&self, data: &Data) -> usize {
        let keys: Vec<PitKey> = self
            .entries
            .iter()
            .filter(|entry| {
                if entry.key().can_be_prefix {
                    entry.key().name.is_prefix_of(&data.name)
                } else {
                    entry.key().name == data.name
                }
            })
            .map(|entry| entry.key().clone())
            .collect();

        let mut satisfied = 0;
        for key in keys {
            if let Some((_, waiters)) = self.entries.remove(&key) {
                satisfied += 1;
                for waiter in waiters {
                    let _ = waiter.send(data.clone());
                }
            }
        }
        satisfied
    }

    /// Guard the entry for an Interest: the entry is expired when the guard
    /// drops, unless a satisfying Data arrived and the owner disarmed it.
    /// Cleanup therefore survives the owning future being dropped mid-flight.
    pub fn guard(&self, interest: &Interest) -> PitGuard<'_> {
        PitGuard {
            pit: self,
            key: PitKey::of(interest),
            armed: true,
        }
    }
}

/// Expires a registered Interest on drop unless disarmed
pub struct PitGuard<'a> {
    pit: &'a Pit,
    key: PitKey,
    armed: bool,
}

impl PitGuard<'_> {
    /// The entry was satisfied; leave the table alone on drop
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PitGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.pit.entries.remove(&self.key);
        }
    }
}
