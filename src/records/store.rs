//! In-memory product store.

use crate::error::{CatalogError, Result};
use crate::types::{Product, ProductId};

/// Ordered, volatile collection of products.
///
/// Has no locking of its own; the owning [`Catalog`](crate::Catalog)
/// serializes access.
#[derive(Debug, Default)]
pub struct RecordStore {
    products: Vec<Product>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All products in insertion order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// First product with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// First product with the given id.
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Append a product. Duplicate ids are accepted.
    pub fn insert(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Remove the first product with the given id and return it.
    pub fn remove_by_id(&mut self, id: ProductId) -> Result<Product> {
        let pos = self.position(id)?;
        Ok(self.products.remove(pos))
    }

    /// Replace the description of the first product with the given id.
    pub fn update_description(
        &mut self,
        id: ProductId,
        description: impl Into<String>,
    ) -> Result<Product> {
        let pos = self.position(id)?;
        let product = &mut self.products[pos];
        product.description = description.into();
        Ok(product.clone())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Drop every product.
    pub fn clear(&mut self) {
        self.products.clear();
    }

    fn position(&self, id: ProductId) -> Result<usize> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(id: i64) -> Product {
        Product::new(id, format!("Widget {}", id), "basic")
    }

    #[test]
    fn test_insert_and_list_order() {
        let mut store = RecordStore::new();
        store.insert(widget(3));
        store.insert(widget(1));
        store.insert(widget(2));

        let ids: Vec<i64> = store.list().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_duplicate_ids_accepted() {
        let mut store = RecordStore::new();
        store.insert(Product::new(1, "first", "a"));
        store.insert(Product::new(1, "second", "b"));

        assert_eq!(store.len(), 2);
        // First match wins
        assert_eq!(store.find_by_id(ProductId(1)).unwrap().name, "first");
    }

    #[test]
    fn test_find_by_name() {
        let mut store = RecordStore::new();
        store.insert(Product::new(1, "Gadget", "a"));
        store.insert(Product::new(2, "Widget", "b"));
        store.insert(Product::new(3, "Widget", "c"));

        let found = store.find_by_name("Widget").unwrap();
        assert_eq!(found.id, ProductId(2));
        assert!(store.find_by_name("Sprocket").is_none());
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = RecordStore::new();
        store.insert(widget(1));
        store.insert(widget(2));

        let removed = store.remove_by_id(ProductId(1)).unwrap();
        assert_eq!(removed, widget(1));
        assert!(store.find_by_id(ProductId(1)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_missing() {
        let mut store = RecordStore::new();
        let result = store.remove_by_id(ProductId(9));
        assert!(matches!(result, Err(CatalogError::NotFound(ProductId(9)))));
    }

    #[test]
    fn test_remove_duplicate_removes_first_only() {
        let mut store = RecordStore::new();
        store.insert(Product::new(1, "first", "a"));
        store.insert(Product::new(1, "second", "b"));

        let removed = store.remove_by_id(ProductId(1)).unwrap();
        assert_eq!(removed.name, "first");
        assert_eq!(store.find_by_id(ProductId(1)).unwrap().name, "second");
    }

    #[test]
    fn test_update_description() {
        let mut store = RecordStore::new();
        store.insert(widget(1));

        let updated = store.update_description(ProductId(1), "v2").unwrap();
        assert_eq!(updated.description, "v2");
        assert_eq!(updated.name, "Widget 1");
        assert_eq!(store.find_by_id(ProductId(1)).unwrap().description, "v2");
    }

    #[test]
    fn test_update_missing() {
        let mut store = RecordStore::new();
        let result = store.update_description(ProductId(1), "v2");
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_clear() {
        let mut store = RecordStore::new();
        store.insert(widget(1));
        store.clear();
        assert!(store.is_empty());
    }
}
