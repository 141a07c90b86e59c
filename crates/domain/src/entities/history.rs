//! Rolling window of recent snapshots

use std::collections::VecDeque;
use std::sync::Arc;

use super::WeatherSnapshot;

/// Default number of snapshots kept
pub const HISTORY_CAPACITY: usize = 24;

/// Bounded FIFO; pushing past capacity evicts the oldest entry
#[derive(Debug, Clone)]
pub struct HistoryBuffer<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

/// History of published snapshots
pub type SnapshotHistory = HistoryBuffer<Arc<WeatherSnapshot>>;

impl<T> HistoryBuffer<T> {
    /// Buffer with the default capacity of 24
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Buffer with a custom capacity (at least 1)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Second-to-last entry: the reading before the most recent one
    #[must_use]
    pub fn previous(&self) -> Option<&T> {
        let len = self.entries.len();
        if len < 2 {
            return None;
        }
        self.entries.get(len - 2)
    }

    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T> Default for HistoryBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_needs_two_entries() {
        let mut history = HistoryBuffer::new();
        assert!(history.previous().is_none());
        history.push(1);
        assert!(history.previous().is_none());
        assert_eq!(history.latest(), Some(&1));
        history.push(2);
        assert_eq!(history.previous(), Some(&1));
        assert_eq!(history.latest(), Some(&2));
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut history = HistoryBuffer::new();
        for i in 0..30 {
            history.push(i);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.iter().next(), Some(&6));
        assert_eq!(history.latest(), Some(&29));
        assert_eq!(history.previous(), Some(&28));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut history = HistoryBuffer::with_capacity(0);
        history.push("a");
        history.push("b");
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some(&"b"));
    }

    #[test]
    fn empty_buffer() {
        let history: HistoryBuffer<u8> = HistoryBuffer::default();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }
}
