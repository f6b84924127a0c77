//! Core types for the catalog.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied product identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Debug for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductId({})", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id)
    }
}

/// A single product in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Primary key. Uniqueness is not enforced by the store.
    pub id: ProductId,

    /// Display name (not unique).
    pub name: String,

    /// Free-form description, the only field that can change in place.
    pub description: String,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// What happened to a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Deleted,
    Updated,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "added"),
            ChangeKind::Deleted => write!(f, "deleted"),
            ChangeKind::Updated => write!(f, "updated"),
        }
    }
}

/// Broadcast after every successful write.
///
/// For deletes the product is the one just removed; for updates it is the
/// value after the change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub product: Product,
}

impl ChangeEvent {
    pub fn added(product: Product) -> Self {
        Self {
            kind: ChangeKind::Added,
            product,
        }
    }

    pub fn deleted(product: Product) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            product,
        }
    }

    pub fn updated(product: Product) -> Self {
        Self {
            kind: ChangeKind::Updated,
            product,
        }
    }

    /// Encode for a transport that speaks JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// --- Requests ---

/// Input for adding a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProduct {
    pub name: String,
    pub id: ProductId,
    pub description: String,
}

impl AddProduct {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<ProductId>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            description: description.into(),
        }
    }

    pub(crate) fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
        }
    }
}

/// Input for replacing a product's description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDescription {
    pub id: ProductId,
    pub description: String,
}

impl UpdateDescription {
    pub fn new(id: impl Into<ProductId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// A write request, as handed over by the transport layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    Add(AddProduct),
    Delete { id: ProductId },
    UpdateDescription(UpdateDescription),
}

impl Mutation {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A read request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Query {
    List,
    FindByName { name: String },
    FindById { id: ProductId },
}

impl Query {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Answer to a [`Query`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum QueryResult {
    Products(Vec<Product>),
    Product(Option<Product>),
}

/// Catalog statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub product_count: usize,
    pub listener_count: usize,
    pub events_published: u64,
}
