//! Bounded undo/redo history of theme snapshots.

use std::collections::VecDeque;

use tracing::trace;

use crate::theme::Theme;

/// Default number of snapshots kept.
pub const MAX_HISTORY: usize = 50;

/// Snapshots plus a cursor at the entry that is current.
///
/// Pushing discards any redo entries past the cursor, then evicts the
/// oldest snapshot once the capacity is exceeded. The cursor always points
/// at an existing entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Theme>,
    index: usize,
    capacity: usize,
}

impl History {
    /// A history holding only `initial`, with the default capacity.
    pub fn new(initial: Theme) -> Self {
        Self::with_capacity(initial, MAX_HISTORY)
    }

    /// A history holding only `initial`. Capacity is at least one.
    pub fn with_capacity(initial: Theme, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity.min(MAX_HISTORY));
        entries.push_back(initial);
        Self {
            entries,
            index: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history holds at least one snapshot.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&Theme> {
        self.entries.get(self.index)
    }

    pub fn get(&self, index: usize) -> Option<&Theme> {
        self.entries.get(index)
    }

    /// Record a snapshot after the cursor, discarding redo entries.
    pub fn push(&mut self, theme: Theme) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(theme);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
        self.check();
        trace!(history.index = self.index, history.len = self.entries.len(), "History push");
    }

    /// Step back one snapshot. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&Theme> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.check();
        self.entries.get(self.index)
    }

    /// Step forward one snapshot. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&Theme> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.check();
        self.entries.get(self.index)
    }

    /// Drop everything and start over from `theme`.
    pub fn reset(&mut self, theme: Theme) {
        self.entries.clear();
        self.entries.push_back(theme);
        self.index = 0;
        self.check();
    }

    fn check(&self) {
        debug_assert!(
            self.index < self.entries.len(),
            "history cursor {} out of bounds for {} entries",
            self.index,
            self.entries.len()
        );
        debug_assert!(self.entries.len() <= self.capacity);
    }
}
