//! # Catalog Feed
//!
//! An in-memory product catalog that broadcasts every change to live
//! listeners.
//!
//! ## Core Concepts
//!
//! - **Products**: Volatile records keyed by a caller-supplied id
//! - **Event Bus**: Topic-keyed publish/subscribe with per-subscriber queues
//! - **Catalog**: Applies writes and publishes one change event per write
//! - **Newsfeed**: Hands out listeners that stream changes as they happen
//!
//! ## Example
//!
//! ```ignore
//! use catalog_feed::{AddProduct, Catalog, ChangeKind, UpdateDescription};
//!
//! let catalog = Catalog::new();
//! let listener = catalog.listen();
//!
//! catalog.add(AddProduct::new("Widget", 1, "basic"));
//! catalog.update_description(UpdateDescription::new(1, "v2"))?;
//!
//! for change in listener.take(2) {
//!     println!("{}: {:?}", change.kind, change.product);
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod feed;
pub mod records;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use catalog::{Catalog, CatalogConfig};
pub use error::{CatalogError, Result};
pub use feed::{Listener, Newsfeed, DEFAULT_TOPIC};
pub use records::RecordStore;
pub use subscriptions::{BusConfig, EventBus, SubscriptionHandle, SubscriptionId};
pub use types::*;
