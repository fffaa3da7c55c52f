//! Shared Ranked Queue
//!
//! A long-lived `RankedQueue` owned by the serving context and mutated by unrelated calls.
//! Every operation takes the same async mutex, so pushes and pops never interleave and the
//! heap invariant always holds between calls. There is no eviction: entries leave only via `pop`.

use super::heap::RankedQueue;
use super::scoring::coerce_priority;
use super::types::{PriorityError, RankedEntry};

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct SharedRankedQueue<T> {
    inner: Mutex<RankedQueue<T>>,
}

impl<T: Clone + Send> SharedRankedQueue<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(RankedQueue::new()),
        })
    }

    /// Pushes an entry and returns the size afterwards.
    pub async fn push(&self, payload: T, priority: i64) -> usize {
        let mut queue = self.inner.lock().await;
        queue.push(payload, priority);
        tracing::trace!("Pushed entry with priority {} (size {})", priority, queue.len());
        queue.len()
    }

    /// Pushes with a priority that still has to be read as an integer.
    ///
    /// Nothing is inserted when the priority is missing or not coercible.
    pub async fn push_loose(
        &self,
        payload: T,
        priority: Option<&Value>,
    ) -> Result<usize, PriorityError> {
        let priority = coerce_priority(priority)?;
        Ok(self.push(payload, priority).await)
    }

    /// Removes the maximum entry. Returns it together with the size left behind.
    pub async fn pop(&self) -> Option<(RankedEntry<T>, usize)> {
        let mut queue = self.inner.lock().await;
        let popped = queue.pop()?;
        Some((RankedEntry::from(popped), queue.len()))
    }

    pub async fn peek(&self) -> Option<(RankedEntry<T>, usize)> {
        let queue = self.inner.lock().await;
        let len = queue.len();
        queue.peek().map(|(priority, payload)| {
            (
                RankedEntry {
                    priority,
                    payload: payload.clone(),
                },
                len,
            )
        })
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Heap-order dump for diagnostics.
    pub async fn snapshot(&self) -> Vec<RankedEntry<T>> {
        self.inner
            .lock()
            .await
            .snapshot()
            .into_iter()
            .map(RankedEntry::from)
            .collect()
    }

    /// Runs `f` with exclusive access, for compound operations that must not interleave.
    pub async fn with_queue<R>(&self, f: impl FnOnce(&mut RankedQueue<T>) -> R) -> R {
        let mut queue = self.inner.lock().await;
        f(&mut queue)
    }
}
