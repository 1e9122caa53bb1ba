//! In-memory cache tier

use super::types::{CacheEntry, CacheKey};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

/// Stale order records tolerated beyond the live entries before compacting
const COMPACT_SLACK: usize = 64;

/// Bounded, insertion-ordered entry map
///
/// Once `capacity` entries are held, inserting a new key drops the entry
/// that was inserted first. Reads do not change the order, so eviction is
/// FIFO rather than LRU. Re-inserting an existing key replaces the entry
/// and moves it to the newest position.
///
/// Insertion order is a queue of `(sequence, key)` records. Replacing or
/// removing an entry leaves its old record behind; records whose sequence
/// no longer matches the live entry are skipped on eviction and dropped in
/// bulk once they outnumber the entries, keeping every operation O(1)
/// amortized.
#[derive(Debug)]
pub struct MemoryStorage {
    slots: Mutex<Slots>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct Slots {
    entries: HashMap<CacheKey, Slot>,
    order: VecDeque<(u64, CacheKey)>,
    next_seq: u64,
}

#[derive(Debug)]
struct Slot {
    seq: u64,
    entry: CacheEntry,
}

impl Slots {
    fn is_live(entries: &HashMap<CacheKey, Slot>, seq: u64, key: &CacheKey) -> bool {
        entries.get(key).is_some_and(|slot| slot.seq == seq)
    }

    fn push(&mut self, entry: CacheEntry) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.push_back((seq, entry.key.clone()));
        self.entries.insert(entry.key.clone(), Slot { seq, entry });
    }

    fn pop_oldest(&mut self) -> Option<CacheKey> {
        while let Some((seq, key)) = self.order.pop_front() {
            if Self::is_live(&self.entries, seq, &key) {
                self.entries.remove(&key);
                return Some(key);
            }
        }
        None
    }

    fn compact(&mut self) {
        if self.order.len() <= 2 * self.entries.len() + COMPACT_SLACK {
            return;
        }
        let Self { entries, order, .. } = self;
        order.retain(|(seq, key)| Self::is_live(entries, *seq, key));
    }
}

impl MemoryStorage {
    /// Create a memory tier holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(Slots::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up an entry without checking expiry
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.slots.lock().entries.get(key).map(|slot| slot.entry.clone())
    }

    /// Insert an entry, returning the key evicted to make room
    pub fn insert(&self, entry: CacheEntry) -> Option<CacheKey> {
        let mut slots = self.slots.lock();

        let is_new = !slots.entries.contains_key(&entry.key);
        let evicted = if is_new && slots.entries.len() >= self.capacity {
            slots.pop_oldest()
        } else {
            None
        };
        slots.push(entry);
        slots.compact();
        evicted
    }

    pub fn remove(&self, key: &CacheKey) -> Option<CacheEntry> {
        let mut slots = self.slots.lock();
        let removed = slots.entries.remove(key).map(|slot| slot.entry);
        slots.compact();
        removed
    }

    /// Drop every entry, returning how many were held
    pub fn clear(&self) -> usize {
        let mut slots = self.slots.lock();
        let count = slots.entries.len();
        slots.entries.clear();
        slots.order.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.slots.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().entries.is_empty()
    }

    /// Remove entries that are expired at `now`, returning how many were removed
    pub fn remove_expired(&self, now: DateTime<Utc>) -> usize {
        let mut slots = self.slots.lock();
        let before = slots.entries.len();
        slots.entries.retain(|_, slot| !slot.entry.is_expired_at(now));
        let removed = before - slots.entries.len();
        slots.compact();
        removed
    }

    /// Keys in insertion order, oldest first
    pub fn keys(&self) -> Vec<CacheKey> {
        let slots = self.slots.lock();
        slots
            .order
            .iter()
            .filter(|(seq, key)| Slots::is_live(&slots.entries, *seq, key))
            .map(|(_, key)| key.clone())
            .collect()
    }

    /// Order records currently held, live or stale
    #[cfg(test)]
    pub(crate) fn order_len(&self) -> usize {
        self.slots.lock().order.len()
    }
}
