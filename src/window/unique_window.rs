//! Bounded unique-value window
//!
//! Holds at most `capacity` distinct values in first-seen order. A value
//! already present is skipped without reordering; a new value is appended
//! and, once the window overflows, the oldest element is evicted.

use std::{
    collections::{HashSet, VecDeque},
    hash::Hash,
};

pub const DEFAULT_WINDOW_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct UniqueWindow<T> {
    values: VecDeque<T>,
    members: HashSet<T>,
    capacity: usize,
}

impl<T: Eq + Hash + Clone> UniqueWindow<T> {
    /// Create an empty window. A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity + 1),
            members: HashSet::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Ingest a batch in arrival order and return the resulting contents
    pub fn ingest_and_snapshot(&mut self, batch: &[T]) -> Vec<T> {
        for value in batch {
            self.push_unique(value);
        }
        self.snapshot()
    }

    /// Returns false when the value was already present
    fn push_unique(&mut self, value: &T) -> bool {
        if self.members.contains(value) {
            return false;
        }

        self.members.insert(value.clone());
        self.values.push_back(value.clone());

        if self.values.len() > self.capacity {
            if let Some(evicted) = self.values.pop_front() {
                self.members.remove(&evicted);
            }
        }

        true
    }

    /// Copy of the current contents, oldest first
    pub fn snapshot(&self) -> Vec<T> {
        self.values.iter().cloned().collect()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.members.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Eq + Hash + Clone> Default for UniqueWindow<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}
