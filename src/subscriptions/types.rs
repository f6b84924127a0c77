//! Subscription types for the event bus.

use crossbeam_channel::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::sync::Weak;
use std::time::Duration;

use super::manager::BusShared;

/// Configuration for an event bus.
#[derive(Clone, Debug, Default)]
pub struct BusConfig {
    /// Per-subscription queue capacity.
    ///
    /// `None` (default) queues without limit, so publishing never loses an
    /// event. `Some(n)` caps each queue at `n`; a subscription that is full
    /// when an event is published is dropped from the bus. A capacity of 0 is
    /// treated as 1.
    pub buffer_size: Option<usize>,
}

impl BusConfig {
    /// Unbounded per-subscription queues.
    pub fn unbounded() -> Self {
        Self { buffer_size: None }
    }

    /// Bounded queues, dropping subscribers that fall `capacity` events behind.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            buffer_size: Some(capacity.max(1)),
        }
    }
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Receiving end of a subscription.
///
/// Iterating blocks until the next event arrives and only ends once the
/// subscription has been removed from the bus and everything already queued
/// has been consumed. Dropping the handle unsubscribes it.
pub struct SubscriptionHandle<T> {
    pub id: SubscriptionId,
    topic: String,
    receiver: Receiver<T>,
    bus: Weak<BusShared<T>>,
}

impl<T> SubscriptionHandle<T> {
    pub(crate) fn new(
        id: SubscriptionId,
        topic: String,
        receiver: Receiver<T>,
        bus: Weak<BusShared<T>>,
    ) -> Self {
        Self {
            id,
            topic,
            receiver,
            bus,
        }
    }

    /// Topic this subscription listens on.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<T, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Number of events waiting to be received.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Remove the subscription from the bus now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<T> Iterator for SubscriptionHandle<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.receiver.recv().ok()
    }
}

impl<T> Drop for SubscriptionHandle<T> {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.remove(&self.topic, self.id);
        }
    }
}

impl<T> std::fmt::Debug for SubscriptionHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .field("pending", &self.receiver.len())
            .finish()
    }
}
