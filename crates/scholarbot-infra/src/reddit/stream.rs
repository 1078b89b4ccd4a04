//! Seen-window bookkeeping for the emulated comment stream.
//!
//! The listing endpoint returns the newest N comments on every poll, most of
//! which were already seen on the previous poll. `SeenWindow` remembers a
//! bounded set of recent fullnames so each poll contributes only genuinely
//! new items. Bounded, because the dedup ledger already guards against
//! double replies; the window only has to outlast the overlap between
//! consecutive polls.

use std::collections::{HashSet, VecDeque};

/// Bounded FIFO set of recently observed ids.
pub(super) struct SeenWindow {
    capacity: usize,
    order: VecDeque<String>,
    members: HashSet<String>,
}

impl SeenWindow {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }

    /// Insert `id`; returns true when the id was not already in the window.
    ///
    /// When full, the oldest id is evicted first.
    pub(super) fn insert(&mut self, id: &str) -> bool {
        if self.members.contains(id) {
            return false;
        }
        if self.order.len() == self.capacity
            && let Some(evicted) = self.order.pop_front()
        {
            self.members.remove(&evicted);
        }
        self.order.push_back(id.to_string());
        self.members.insert(id.to_string());
        true
    }

    pub(super) fn len(&self) -> usize {
        self.order.len()
    }
}
