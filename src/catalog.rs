//! Catalog service tying the store and the change feed together.

use crate::error::Result;
use crate::feed::{Listener, Newsfeed, DEFAULT_TOPIC};
use crate::records::RecordStore;
use crate::subscriptions::BusConfig;
use crate::types::{
    AddProduct, CatalogStats, ChangeEvent, Mutation, Product, ProductId, Query, QueryResult,
    UpdateDescription,
};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};

/// Catalog configuration.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// Topic changes are published on.
    pub topic: String,

    /// Per-listener queue capacity (None = unbounded).
    pub buffer_size: Option<usize>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            buffer_size: None,
        }
    }
}

/// The product catalog.
///
/// Every successful write publishes exactly one [`ChangeEvent`] after the
/// store has been updated and before the write returns. Writes are
/// serialized, so listeners see changes in commit order.
pub struct Catalog {
    config: CatalogConfig,

    products: RwLock<RecordStore>,

    feed: Newsfeed,

    /// Held across mutate + publish.
    write_lock: Mutex<()>,

    events_published: AtomicU64,
}

impl Catalog {
    /// Create an empty catalog with default configuration.
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        let feed = Newsfeed::new(
            config.topic.clone(),
            BusConfig {
                buffer_size: config.buffer_size,
            },
        );

        Self {
            config,
            products: RwLock::new(RecordStore::new()),
            feed,
            write_lock: Mutex::new(()),
            events_published: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // --- Writes ---

    /// Add a product. Ids are not checked for uniqueness.
    pub fn add(&self, input: AddProduct) -> Product {
        let _lock = self.write_lock.lock();

        let product = input.into_product();
        self.products.write().insert(product.clone());
        tracing::debug!(id = product.id.0, name = %product.name, "product added");

        self.publish(ChangeEvent::added(product.clone()));
        product
    }

    /// Delete the first product with `id` and return it.
    pub fn delete(&self, id: ProductId) -> Result<Product> {
        let _lock = self.write_lock.lock();

        let removed = self.products.write().remove_by_id(id)?;
        tracing::debug!(id = id.0, "product deleted");

        self.publish(ChangeEvent::deleted(removed.clone()));
        Ok(removed)
    }

    /// Replace the description of the first product with the given id.
    pub fn update_description(&self, input: UpdateDescription) -> Result<Product> {
        let _lock = self.write_lock.lock();

        let updated = self
            .products
            .write()
            .update_description(input.id, input.description)?;
        tracing::debug!(id = input.id.0, "product description updated");

        self.publish(ChangeEvent::updated(updated.clone()));
        Ok(updated)
    }

    /// Run a write request.
    pub fn apply(&self, mutation: Mutation) -> Result<Product> {
        match mutation {
            Mutation::Add(input) => Ok(self.add(input)),
            Mutation::Delete { id } => self.delete(id),
            Mutation::UpdateDescription(input) => self.update_description(input),
        }
    }

    fn publish(&self, event: ChangeEvent) {
        let kind = event.kind;
        let delivered = self.feed.publish(event);
        self.events_published.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(%kind, delivered, "change published");
    }

    // --- Reads ---

    /// All products in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.products.read().list().to_vec()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Product> {
        self.products.read().find_by_name(name).cloned()
    }

    pub fn find_by_id(&self, id: ProductId) -> Option<Product> {
        self.products.read().find_by_id(id).cloned()
    }

    /// Run a read request. Never publishes.
    pub fn query(&self, query: Query) -> QueryResult {
        match query {
            Query::List => QueryResult::Products(self.list()),
            Query::FindByName { name } => QueryResult::Product(self.find_by_name(&name)),
            Query::FindById { id } => QueryResult::Product(self.find_by_id(id)),
        }
    }

    // --- Listening ---

    /// Start receiving every change committed from now on.
    pub fn listen(&self) -> Listener {
        self.feed.listen()
    }

    pub fn listener_count(&self) -> usize {
        self.feed.listener_count()
    }

    // --- Maintenance ---

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            product_count: self.products.read().len(),
            listener_count: self.feed.listener_count(),
            events_published: self.events_published.load(Ordering::Relaxed),
        }
    }

    /// Empty the catalog, disconnect all listeners and zero the counters.
    pub fn reset(&self) {
        let _lock = self.write_lock.lock();

        self.products.write().clear();
        self.feed.close_all();
        self.events_published.store(0, Ordering::Relaxed);
        tracing::debug!("catalog reset");
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
