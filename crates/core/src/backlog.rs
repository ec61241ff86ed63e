// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-capacity ring of the most recent entries

use crate::entry::Entry;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Circular store indexed by `sequence mod capacity`
pub struct Backlog {
    slots: Vec<Option<Arc<Entry>>>,
    /// Highest sequence written so far
    last: Option<i64>,
}

impl Backlog {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            slots: vec![None; capacity.get()],
            last: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Highest sequence number written, if any
    pub fn last_sequence(&self) -> Option<i64> {
        self.last
    }

    /// Number of entries currently retained
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    fn slot_of(&self, sequence: i64) -> usize {
        sequence.rem_euclid(self.capacity() as i64) as usize
    }

    /// Store an entry in the slot for its sequence number
    ///
    /// Returns false if the slot already holds a newer entry. That happens
    /// when this entry was slow to convert and has already been lapped; the
    /// newer entry is kept.
    pub fn insert(&mut self, entry: Arc<Entry>) -> bool {
        let sequence = entry.sequence();
        let slot = self.slot_of(sequence);
        if let Some(existing) = &self.slots[slot] {
            if existing.sequence() > sequence {
                return false;
            }
        }
        self.slots[slot] = Some(entry);
        self.last = Some(self.last.map_or(sequence, |last| last.max(sequence)));
        true
    }

    /// Retained entries, oldest first
    ///
    /// Slots that do not hold the sequence expected at their position are
    /// skipped: either the entry is still being converted on another thread,
    /// or the slot holds a stale entry from the previous lap.
    pub fn snapshot(&self) -> Vec<Arc<Entry>> {
        let Some(last) = self.last else {
            return Vec::new();
        };
        let capacity = self.capacity() as i64;

        let first = if last < capacity {
            0
        } else {
            last - capacity + 1
        };

        (first..=last)
            .filter_map(|sequence| {
                self.slots[self.slot_of(sequence)]
                    .as_ref()
                    .filter(|entry| entry.sequence() == sequence)
                    .cloned()
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "backlog_tests.rs"]
mod tests;
