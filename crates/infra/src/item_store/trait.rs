use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::ItemId;
use catalog_items::Item;

/// Item store operation error.
///
/// These are **infrastructure errors**; domain failures (validation, malformed
/// identifiers) are rejected before a store is reached.
#[derive(Debug, Error)]
pub enum ItemStoreError {
    /// `replace`/`delete` targeted an id with no stored item.
    #[error("item not found")]
    NotFound,

    /// The backend could not be reached or the query failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be mapped back to an item.
    #[error("corrupt stored item: {0}")]
    Corrupt(String),
}

/// Persistence abstraction over catalog items.
///
/// ## Semantics
///
/// - `list` returns every stored item (insertion order for the in-memory backend)
/// - `get` returns `Ok(None)` for an unknown id
/// - `insert` performs no uniqueness check beyond id generation
/// - `replace` and `delete` return `ItemStoreError::NotFound` for an unknown id
///
/// No versioning or isolation spans calls: a `get` followed by a `replace` can
/// race with a concurrent `delete`.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Item>, ItemStoreError>;

    async fn get(&self, id: ItemId) -> Result<Option<Item>, ItemStoreError>;

    async fn insert(&self, item: Item) -> Result<(), ItemStoreError>;

    /// Overwrite the stored item with the same id.
    async fn replace(&self, item: Item) -> Result<(), ItemStoreError>;

    async fn delete(&self, id: ItemId) -> Result<(), ItemStoreError>;
}

#[async_trait]
impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    async fn list(&self) -> Result<Vec<Item>, ItemStoreError> {
        (**self).list().await
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>, ItemStoreError> {
        (**self).get(id).await
    }

    async fn insert(&self, item: Item) -> Result<(), ItemStoreError> {
        (**self).insert(item).await
    }

    async fn replace(&self, item: Item) -> Result<(), ItemStoreError> {
        (**self).replace(item).await
    }

    async fn delete(&self, id: ItemId) -> Result<(), ItemStoreError> {
        (**self).delete(id).await
    }
}
