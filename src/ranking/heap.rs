//! Array-backed Binary Max-Heap
//!
//! Stores `(priority, payload)` pairs in a flat `Vec`, with the maximum priority at index 0.
//! For every index `i > 0`, `entries[i].priority <= entries[(i - 1) / 2].priority`.
//!
//! ## Tie Handling
//! Sift-up only swaps when the child is **strictly greater** than its parent, and sift-down
//! only swaps with a strictly greater child. Entries with equal priority therefore come out in
//! an unspecified order; callers must not rely on FIFO behaviour among ties.

use super::types::RankedEntry;

#[derive(Debug, Clone)]
pub struct RankedQueue<T> {
    entries: Vec<RankedEntry<T>>,
}

impl<T> RankedQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts `payload` with the given priority. No deduplication, no capacity bound.
    pub fn push(&mut self, payload: T, priority: i64) {
        self.entries.push(RankedEntry { priority, payload });
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes and returns the highest-priority entry, or `None` when empty.
    pub fn pop(&mut self) -> Option<(i64, T)> {
        if self.entries.is_empty() {
            return None;
        }

        // Move the last element into the root slot, then restore the invariant.
        let root = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }

        Some((root.priority, root.payload))
    }

    pub fn peek(&self) -> Option<(i64, &T)> {
        self.entries
            .first()
            .map(|entry| (entry.priority, &entry.payload))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only view of the backing array, in heap order.
    pub fn entries(&self) -> &[RankedEntry<T>] {
        &self.entries
    }

    /// Pops every entry, yielding a descending-priority ordering.
    pub fn into_sorted_vec(mut self) -> Vec<(i64, T)> {
        let mut ordered = Vec::with_capacity(self.entries.len());
        while let Some(entry) = self.pop() {
            ordered.push(entry);
        }
        ordered
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.entries[idx].priority > self.entries[parent].priority {
                self.entries.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut largest = idx;

            if left < len && self.entries[left].priority > self.entries[largest].priority {
                largest = left;
            }
            if right < len && self.entries[right].priority > self.entries[largest].priority {
                largest = right;
            }
            if largest == idx {
                break;
            }

            self.entries.swap(idx, largest);
            idx = largest;
        }
    }
}

impl<T: Clone> RankedQueue<T> {
    /// Copy of the internal array as `(priority, payload)` pairs, in heap order (not sorted).
    /// Meant for diagnostics only.
    pub fn snapshot(&self) -> Vec<(i64, T)> {
        self.entries
            .iter()
            .map(|entry| (entry.priority, entry.payload.clone()))
            .collect()
    }
}

impl<T> Default for RankedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<(T, i64)> for RankedQueue<T> {
    fn extend<I: IntoIterator<Item = (T, i64)>>(&mut self, iter: I) {
        for (payload, priority) in iter {
            self.push(payload, priority);
        }
    }
}

impl<T> FromIterator<(T, i64)> for RankedQueue<T> {
    fn from_iter<I: IntoIterator<Item = (T, i64)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut queue = RankedQueue::with_capacity(iter.size_hint().0);
        queue.extend(iter);
        queue
    }
}
