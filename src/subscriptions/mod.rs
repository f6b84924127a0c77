//! Topic-keyed publish/subscribe.
//!
//! An [`EventBus`] fans every published payload out to each subscription
//! currently registered on the payload's topic:
//! - Subscriptions only see events published after they registered
//! - Each subscription has its own queue, so publishing never waits on a
//!   consumer
//! - Dropping a [`SubscriptionHandle`] removes it from the bus
//!
//! # Example
//!
//! ```ignore
//! let bus: EventBus<String> = EventBus::new();
//!
//! let handle = bus.subscribe("greetings");
//! bus.publish("greetings", "hello".to_string());
//!
//! for message in handle {
//!     println!("Got: {}", message);
//! }
//! ```

mod manager;
mod types;

pub use manager::EventBus;
pub use types::{BusConfig, SubscriptionHandle, SubscriptionId};
