// Bounded Queue - fixed-capacity hand-off between producers and the consumer

use std::sync::Mutex;

use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Message, QueueConfig};

/// Queue failure surface.
///
/// Capacity exhaustion is not an error (submitters block instead);
/// the only way a call fails is the queue being closed for shutdown.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueueError {
    #[error("Queue closed")]
    Closed,
}

/// Fixed-slot ring storage. Head/tail wrap modulo capacity; `count`
/// tracks occupancy. Only ever touched under the queue mutex.
struct Ring {
    slots: Vec<Option<Message>>,
    head: usize,
    tail: usize,
    count: usize,
    /// Set by the post-close drain sweep. A submitter that resolved
    /// its space permit before close commits under this same mutex,
    /// so the flag decides atomically whether its message still makes
    /// the sweep or the submit must fail instead of vanishing.
    swept: bool,
}

impl Ring {
    fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            tail: 0,
            count: 0,
            swept: false,
        }
    }

    fn push(&mut self, message: Message) {
        // The space semaphore guarantees a free slot before we get here
        debug_assert!(self.count < self.slots.len());
        debug_assert!(self.slots[self.tail].is_none());
        self.slots[self.tail] = Some(message);
        self.tail = (self.tail + 1) % self.slots.len();
        self.count += 1;
    }

    fn pop(&mut self) -> Message {
        // The items semaphore guarantees an occupied slot before we get here
        debug_assert!(self.count > 0);
        let message = self.slots[self.head]
            .take()
            .expect("items permit held but head slot empty");
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        message
    }
}

/// Fixed-capacity FIFO buffer shared by all producer tasks and the
/// single consumer task.
///
/// Synchronization discipline: one mutex guards the ring (indices and
/// count), and two counting semaphores gate blocking — `items` counts
/// occupied slots (starts at 0), `space` counts free slots (starts at
/// `capacity`). Blocking decisions go through the semaphores only;
/// the count is never consulted outside the lock for a wait decision.
///
/// FIFO order is the order in which submissions complete their
/// critical section. Concurrent submitters serialize on the mutex, so
/// each claims a distinct tail slot; no ordering is promised between
/// producers beyond completion order.
///
/// Constructed once, shared via `Arc`, never resized. [`close`] is the
/// shutdown path: it releases every blocked caller with
/// [`QueueError::Closed`]; residual messages stay readable through
/// [`drain`].
///
/// [`close`]: BoundedQueue::close
/// [`drain`]: BoundedQueue::drain
pub struct BoundedQueue {
    ring: Mutex<Ring>,
    items: Semaphore,
    space: Semaphore,
    capacity: usize,
}

impl BoundedQueue {
    pub fn new(config: &QueueConfig) -> Self {
        Self::with_capacity(config.capacity)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be positive");
        Self {
            ring: Mutex::new(Ring::new(capacity)),
            items: Semaphore::new(0),
            space: Semaphore::new(capacity),
            capacity,
        }
    }

    /// Submit a message, blocking while the queue is full.
    ///
    /// Waits for a free slot, then atomically writes at the tail and
    /// advances it, and finally signals one occupied slot. Never fails
    /// while the queue is open; returns [`QueueError::Closed`] once
    /// [`close`](BoundedQueue::close) has been called, including for
    /// callers already parked on a full queue.
    pub async fn submit(&self, message: Message) -> Result<(), QueueError> {
        let permit = self.space.acquire().await.map_err(|_| QueueError::Closed)?;
        // The free slot is consumed here; its counterpart comes back
        // via add_permits in retrieve()
        permit.forget();

        {
            let mut ring = self.ring.lock().unwrap();
            // A permit resolved before close() does not entitle a
            // commit after the final drain sweep: an Ok here must mean
            // the message is still retrievable or drainable
            if ring.swept {
                return Err(QueueError::Closed);
            }
            ring.push(message);
        }

        self.items.add_permits(1);
        Ok(())
    }

    /// Retrieve the oldest message, blocking while the queue is empty.
    ///
    /// Waits for an occupied slot, then atomically reads at the head
    /// and advances it, and finally signals one free slot. Ownership
    /// of the message transfers to the caller; no message is ever
    /// returned twice. Returns [`QueueError::Closed`] once the queue
    /// is closed, including for callers already parked on an empty
    /// queue.
    pub async fn retrieve(&self) -> Result<Message, QueueError> {
        let permit = self.items.acquire().await.map_err(|_| QueueError::Closed)?;
        permit.forget();

        let message = {
            let mut ring = self.ring.lock().unwrap();
            ring.pop()
        };

        self.space.add_permits(1);
        Ok(message)
    }

    /// Close the queue for shutdown.
    ///
    /// Every task blocked in [`submit`](BoundedQueue::submit) or
    /// [`retrieve`](BoundedQueue::retrieve) wakes with
    /// [`QueueError::Closed`]; later calls fail fast. Messages already
    /// committed are not lost — flush them with
    /// [`drain`](BoundedQueue::drain).
    pub fn close(&self) {
        self.items.close();
        self.space.close();
        debug!(pending = self.len(), "Queue closed");
    }

    /// Remove and return all residual messages, oldest first.
    ///
    /// Intended for the consumer after [`close`](BoundedQueue::close):
    /// it bypasses the (now closed) semaphores and works directly
    /// under the mutex. On a closed queue the sweep is final — a
    /// submitter that was still between its permit and its commit
    /// gets [`QueueError::Closed`] afterwards, so no submission is
    /// ever acknowledged without having been delivered or drained.
    pub fn drain(&self) -> Vec<Message> {
        let mut ring = self.ring.lock().unwrap();
        if self.items.is_closed() {
            ring.swept = true;
        }
        let mut drained = Vec::with_capacity(ring.count);
        while ring.count > 0 {
            drained.push(ring.pop());
        }
        drained
    }

    /// Number of messages currently held. Observability only; never a
    /// basis for a blocking decision.
    pub fn len(&self) -> usize {
        self.ring.lock().unwrap().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_closed(&self) -> bool {
        self.items.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    fn msg(text: &str) -> Message {
        Message::new(text)
    }

    #[tokio::test]
    async fn test_submit_then_retrieve() {
        let queue = BoundedQueue::with_capacity(4);
        queue.submit(msg("a")).await.unwrap();
        assert_eq!(queue.len(), 1);

        let out = queue.retrieve().await.unwrap();
        assert_eq!(out.as_str(), "a");
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_fifo_order_single_task() {
        let queue = BoundedQueue::with_capacity(8);
        for i in 0..8 {
            queue.submit(msg(&format!("m{}", i))).await.unwrap();
        }
        for i in 0..8 {
            assert_eq!(queue.retrieve().await.unwrap().as_str(), format!("m{}", i));
        }
    }

    #[tokio::test]
    async fn test_ring_wraps_around() {
        let queue = BoundedQueue::with_capacity(2);
        // Cycle through the ring several times past the wrap point
        for round in 0..5 {
            queue.submit(msg(&format!("a{}", round))).await.unwrap();
            queue.submit(msg(&format!("b{}", round))).await.unwrap();
            assert_eq!(queue.len(), 2);
            assert_eq!(queue.retrieve().await.unwrap().as_str(), format!("a{}", round));
            assert_eq!(queue.retrieve().await.unwrap().as_str(), format!("b{}", round));
        }
    }

    #[tokio::test]
    async fn test_retrieve_blocks_on_empty() {
        let queue = BoundedQueue::with_capacity(2);
        let blocked = timeout(Duration::from_millis(50), queue.retrieve()).await;
        assert!(blocked.is_err(), "retrieve on empty queue must block");
    }

    #[tokio::test]
    async fn test_submit_blocks_on_full() {
        let queue = BoundedQueue::with_capacity(1);
        queue.submit(msg("first")).await.unwrap();
        let blocked = timeout(Duration::from_millis(50), queue.submit(msg("second"))).await;
        assert!(blocked.is_err(), "submit on full queue must block");
        // The blocked attempt timed out before claiming a slot
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test]
    async fn test_close_fails_fast() {
        let queue = BoundedQueue::with_capacity(2);
        queue.submit(msg("pending")).await.unwrap();
        queue.close();

        assert_eq!(queue.submit(msg("late")).await, Err(QueueError::Closed));
        assert_eq!(queue.retrieve().await.unwrap_err(), QueueError::Closed);

        // Residue survives the close
        let drained = queue.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].as_str(), "pending");
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_drain_preserves_order() {
        let queue = BoundedQueue::with_capacity(4);
        for i in 0..3 {
            queue.submit(msg(&format!("m{}", i))).await.unwrap();
        }
        queue.close();

        let drained: Vec<String> = queue
            .drain()
            .into_iter()
            .map(Message::into_inner)
            .collect();
        assert_eq!(drained, vec!["m0", "m1", "m2"]);
    }
}
