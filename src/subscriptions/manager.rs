//! Event bus broadcasting payloads to topic subscribers.

use crossbeam_channel::{bounded, unbounded, Sender, TrySendError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::types::{BusConfig, SubscriptionHandle, SubscriptionId};

/// Internal subscription state.
struct Registration<T> {
    id: SubscriptionId,
    sender: Sender<T>,
}

impl<T> Registration<T> {
    /// Try to hand over an event. Returns false if the subscriber must be dropped.
    fn try_send(&self, event: T) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => false,
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// State shared between the bus and the handles it gave out.
pub(crate) struct BusShared<T> {
    /// Registrations per topic, in registration order.
    topics: RwLock<HashMap<String, Vec<Registration<T>>>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
    config: BusConfig,
}

impl<T> BusShared<T> {
    /// Remove a registration. Returns false if it was already gone.
    pub(crate) fn remove(&self, topic: &str, id: SubscriptionId) -> bool {
        let mut topics = self.topics.write();
        let Some(subs) = topics.get_mut(topic) else {
            return false;
        };

        let before = subs.len();
        subs.retain(|sub| sub.id != id);
        let removed = subs.len() != before;

        if subs.is_empty() {
            topics.remove(topic);
        }

        if removed {
            tracing::debug!(topic, id = id.0, "unsubscribed");
        }
        removed
    }
}

/// Topic-keyed publish/subscribe bus.
///
/// Cloning is cheap and every clone publishes to the same subscribers.
pub struct EventBus<T> {
    shared: Arc<BusShared<T>>,
}

impl<T: Clone> EventBus<T> {
    /// Create a bus with unbounded subscriber queues.
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Create a bus with custom configuration.
    pub fn with_config(config: BusConfig) -> Self {
        Self {
            shared: Arc::new(BusShared {
                topics: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                config,
            }),
        }
    }

    /// Register a new subscription on `topic`.
    ///
    /// Only events published after this call are delivered.
    pub fn subscribe(&self, topic: &str) -> SubscriptionHandle<T> {
        let id = SubscriptionId(self.shared.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = match self.shared.config.buffer_size {
            // A zero-capacity channel would reject every try_send
            Some(capacity) => bounded(capacity.max(1)),
            None => unbounded(),
        };

        self.shared
            .topics
            .write()
            .entry(topic.to_string())
            .or_default()
            .push(Registration { id, sender });

        tracing::debug!(topic, id = id.0, "subscribed");

        SubscriptionHandle::new(id, topic.to_string(), receiver, Arc::downgrade(&self.shared))
    }

    /// Unsubscribe and clean up.
    ///
    /// Events already queued for the subscription stay readable; nothing new
    /// is delivered once this returns.
    pub fn unsubscribe(&self, topic: &str, id: SubscriptionId) -> bool {
        self.shared.remove(topic, id)
    }

    /// Deliver `event` to every subscription on `topic`, in registration order.
    ///
    /// Never blocks. Subscriptions that cannot take the event (queue full or
    /// receiver gone) are dropped. Returns how many subscriptions accepted it.
    pub fn publish(&self, topic: &str, event: T) -> usize {
        let mut delivered = 0;
        let mut to_remove = Vec::new();

        {
            let topics = self.shared.topics.read();
            if let Some(subs) = topics.get(topic) {
                for sub in subs {
                    if sub.try_send(event.clone()) {
                        delivered += 1;
                    } else {
                        to_remove.push(sub.id);
                    }
                }
            }
        }

        // Remove dropped subscriptions
        for id in to_remove {
            if self.shared.remove(topic, id) {
                tracing::warn!(topic, id = id.0, "dropped subscriber that could not keep up");
            }
        }

        tracing::trace!(topic, delivered, "published");
        delivered
    }

    /// Number of subscriptions on `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.shared.topics.read().get(topic).map_or(0, Vec::len)
    }

    /// Number of subscriptions across all topics.
    pub fn total_subscribers(&self) -> usize {
        self.shared.topics.read().values().map(Vec::len).sum()
    }

    /// Topics that currently have at least one subscription.
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self.shared.topics.read().keys().cloned().collect();
        topics.sort();
        topics
    }

    /// Drop every subscription. Their handles end once drained.
    pub fn clear(&self) {
        let removed: usize = {
            let mut topics = self.shared.topics.write();
            let count = topics.values().map(Vec::len).sum();
            topics.clear();
            count
        };
        tracing::debug!(removed, "cleared all subscriptions");
    }
}

impl<T: Clone> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}
