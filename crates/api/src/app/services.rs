use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use catalog_core::{DomainError, ItemId};
use catalog_infra::{
    config::StoreConfig,
    item_store::{self, InMemoryItemStore, ItemStore, ItemStoreError, MongoItemStore},
};
use catalog_items::{Item, demo_items};

use crate::app::dto::{CreateItemRequest, ItemView, UpdateItemRequest};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure of a catalog operation, as seen by the HTTP layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("item not found")]
    NotFound,

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("store error: {0}")]
    Store(String),
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidId(msg) => Self::InvalidIdentifier(msg),
            DomainError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl From<ItemStoreError> for CatalogError {
    fn from(err: ItemStoreError) -> Self {
        match err {
            ItemStoreError::NotFound => Self::NotFound,
            ItemStoreError::Unavailable(msg) => Self::BackendUnavailable(msg),
            ItemStoreError::Corrupt(msg) => Self::Store(msg),
        }
    }
}

/// Catalog use cases on top of an `ItemStore`.
///
/// Identity and creation time are always assigned here, never taken from the
/// client.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ItemStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_items(&self) -> CatalogResult<Vec<ItemView>> {
        let items: Vec<ItemView> = self.store.list().await?.iter().map(ItemView::from).collect();
        tracing::info!(count = items.len(), "retrieved items");
        Ok(items)
    }

    /// Items whose name contains `filter`, ignoring case. A missing or blank
    /// filter lists everything.
    #[tracing::instrument(skip(self))]
    pub async fn list_items_by_name(&self, filter: Option<&str>) -> CatalogResult<Vec<ItemView>> {
        let filter = match filter {
            Some(f) if !f.trim().is_empty() => f,
            _ => return self.list_items().await,
        };

        let items: Vec<ItemView> = self
            .store
            .list()
            .await?
            .iter()
            .filter(|item| item.name_contains(filter))
            .map(ItemView::from)
            .collect();
        tracing::info!(count = items.len(), "retrieved items");
        Ok(items)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_item(&self, id: ItemId) -> CatalogResult<ItemView> {
        let item = self.store.get(id).await?.ok_or(CatalogError::NotFound)?;
        tracing::info!(%id, "retrieved item");
        Ok(ItemView::from(&item))
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create_item(&self, input: CreateItemRequest) -> CatalogResult<ItemView> {
        let item = Item::create(input.into_details(), Utc::now())?;
        let view = ItemView::from(&item);
        self.store.insert(item).await?;
        tracing::info!(id = %view.id, name = %view.name, price = %view.price, "created item");
        Ok(view)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_item(&self, id: ItemId, input: UpdateItemRequest) -> CatalogResult<()> {
        let mut item = self.store.get(id).await?.ok_or(CatalogError::NotFound)?;
        item.revise(input.into_details())?;
        self.store.replace(item).await?;
        tracing::info!(%id, "updated item");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_item(&self, id: ItemId) -> CatalogResult<()> {
        self.store.get(id).await?.ok_or(CatalogError::NotFound)?;
        self.store.delete(id).await?;
        tracing::info!(%id, "deleted item");
        Ok(())
    }
}

/// Everything the router needs, plus the resources to release on shutdown.
pub struct AppServices {
    pub catalog: Arc<CatalogService>,
    mongo: Option<mongodb::Client>,
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory(seed_demo: bool) -> Self {
        let store = if seed_demo {
            InMemoryItemStore::with_items(demo_items(Utc::now()))
        } else {
            InMemoryItemStore::new()
        };
        Self {
            catalog: Arc::new(CatalogService::new(Arc::new(store))),
            mongo: None,
        }
    }

    pub async fn build(config: &StoreConfig) -> Result<Self, ItemStoreError> {
        match config {
            StoreConfig::InMemory { seed_demo } => {
                tracing::info!(seed_demo, "using in-memory item store");
                Ok(Self::in_memory(*seed_demo))
            }
            StoreConfig::MongoDb(mongo) => {
                let client = item_store::mongo::connect(mongo).await?;
                let store = MongoItemStore::new(&client.database(&mongo.database));
                tracing::info!(database = %mongo.database, "using mongodb item store");
                Ok(Self {
                    catalog: Arc::new(CatalogService::new(Arc::new(store))),
                    mongo: Some(client),
                })
            }
        }
    }

    /// Release backend connections. Call after the server stopped accepting requests.
    pub async fn shutdown(self) {
        if let Some(client) = self.mongo {
            client.shutdown().await;
            tracing::info!("mongodb client shut down");
        }
    }
}
