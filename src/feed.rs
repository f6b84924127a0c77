//! Live change feed for catalog listeners.
//!
//! A [`Newsfeed`] binds an [`EventBus`] to the single topic catalog changes
//! are published on. Every [`Listener`] it hands out is an independent
//! subscription that sees each change published after it was created, in
//! publish order.

use crate::error::{CatalogError, Result};
use crate::subscriptions::{BusConfig, EventBus, SubscriptionHandle, SubscriptionId};
use crate::types::ChangeEvent;
use crossbeam_channel::{RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// Default topic for catalog changes.
pub const DEFAULT_TOPIC: &str = "catalog.changes";

/// Publishes catalog changes and hands out listeners for them.
#[derive(Clone)]
pub struct Newsfeed {
    bus: EventBus<ChangeEvent>,
    topic: String,
}

impl Newsfeed {
    pub fn new(topic: impl Into<String>, config: BusConfig) -> Self {
        Self {
            bus: EventBus::with_config(config),
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Start listening for changes published from now on.
    pub fn listen(&self) -> Listener {
        Listener {
            handle: self.bus.subscribe(&self.topic),
        }
    }

    /// Fan a change out to every listener. Returns how many received it.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        self.bus.publish(&self.topic, event)
    }

    pub fn listener_count(&self) -> usize {
        self.bus.subscriber_count(&self.topic)
    }

    /// Disconnect every listener.
    pub fn close_all(&self) {
        self.bus.clear();
    }
}

impl Default for Newsfeed {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC, BusConfig::default())
    }
}

/// One consumer's view of the change feed.
///
/// Iterating blocks for the next change and never ends on its own; it stops
/// only after the listener has been disconnected and its queue drained.
/// Dropping the listener releases its registration.
#[derive(Debug)]
pub struct Listener {
    handle: SubscriptionHandle<ChangeEvent>,
}

impl Listener {
    pub fn id(&self) -> SubscriptionId {
        self.handle.id
    }

    /// Wait for the next change.
    pub fn recv(&self) -> Result<ChangeEvent> {
        self.handle
            .recv()
            .map_err(|_| CatalogError::SubscriptionClosed)
    }

    /// Next change if one is already queued.
    pub fn try_recv(&self) -> Result<Option<ChangeEvent>> {
        match self.handle.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(CatalogError::SubscriptionClosed),
        }
    }

    /// Wait up to `timeout` for the next change. `Ok(None)` on timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<ChangeEvent>> {
        match self.handle.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(CatalogError::SubscriptionClosed),
        }
    }

    /// Stop listening.
    pub fn cancel(self) {
        self.handle.unsubscribe();
    }
}

impl Iterator for Listener {
    type Item = ChangeEvent;

    fn next(&mut self) -> Option<ChangeEvent> {
        self.handle.next()
    }
}
