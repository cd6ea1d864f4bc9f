use std::sync::RwLock;

use async_trait::async_trait;

use catalog_core::ItemId;
use catalog_items::Item;

use super::r#trait::{ItemStore, ItemStoreError};

/// In-memory item store backed by an insertion-ordered list.
///
/// Intended for tests/dev. Lookups are linear scans.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<Vec<Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-populated list (e.g. `catalog_items::demo_items`).
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    fn poisoned() -> ItemStoreError {
        ItemStoreError::Unavailable("lock poisoned".to_string())
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> Result<Vec<Item>, ItemStoreError> {
        let items = self.items.read().map_err(|_| Self::poisoned())?;
        Ok(items.clone())
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>, ItemStoreError> {
        let items = self.items.read().map_err(|_| Self::poisoned())?;
        Ok(items.iter().find(|i| i.id() == id).cloned())
    }

    async fn insert(&self, item: Item) -> Result<(), ItemStoreError> {
        let mut items = self.items.write().map_err(|_| Self::poisoned())?;
        items.push(item);
        Ok(())
    }

    async fn replace(&self, item: Item) -> Result<(), ItemStoreError> {
        let mut items = self.items.write().map_err(|_| Self::poisoned())?;
        let slot = items
            .iter_mut()
            .find(|i| i.id() == item.id())
            .ok_or(ItemStoreError::NotFound)?;
        *slot = item;
        Ok(())
    }

    async fn delete(&self, id: ItemId) -> Result<(), ItemStoreError> {
        let mut items = self.items.write().map_err(|_| Self::poisoned())?;
        let index = items
            .iter()
            .position(|i| i.id() == id)
            .ok_or(ItemStoreError::NotFound)?;
        items.remove(index);
        Ok(())
    }
}
