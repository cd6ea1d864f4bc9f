//! MongoDB-backed item store.
//!
//! One document per item in the `Items` collection. The item id is stored as
//! `_id` in BSON UUID form (binary subtype 4), `created_at` as a BSON datetime
//! and `price` as a decimal string so no precision is lost.

use core::str::FromStr;

use async_trait::async_trait;
use bson::doc;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{Client, Collection, Database, error::ErrorKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_core::ItemId;
use catalog_items::{Item, ItemDetails};

use super::r#trait::{ItemStore, ItemStoreError};
use crate::config::MongoConfig;

/// Collection holding one document per item.
pub const ITEMS_COLLECTION: &str = "Items";

/// Persisted shape of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id", with = "bson::serde_helpers::uuid_1_as_binary")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl From<&Item> for ItemDocument {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id().into(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            price: item.price().to_string(),
            created_at: item.created_at(),
        }
    }
}

impl TryFrom<ItemDocument> for Item {
    type Error = ItemStoreError;

    fn try_from(doc: ItemDocument) -> Result<Self, Self::Error> {
        let price = Decimal::from_str(&doc.price).map_err(|e| {
            ItemStoreError::Corrupt(format!("item {}: price {:?}: {e}", doc.id, doc.price))
        })?;
        Ok(Item::restore(
            ItemId::from_uuid(doc.id),
            ItemDetails {
                name: doc.name,
                description: doc.description,
                price,
            },
            doc.created_at,
        ))
    }
}

fn id_filter(id: ItemId) -> bson::Document {
    doc! { "_id": bson::Uuid::from_uuid_1(id.into()) }
}

/// Documents the driver cannot decode will never read back, so they are
/// `Corrupt`. Everything else from the driver is treated as the backend being
/// unreachable.
fn store_error(err: mongodb::error::Error) -> ItemStoreError {
    match *err.kind {
        ErrorKind::BsonDeserialization(_) => ItemStoreError::Corrupt(err.to_string()),
        _ => ItemStoreError::Unavailable(err.to_string()),
    }
}

/// Open a client for `config` and verify the server answers a ping.
///
/// The returned client is the process-wide connection handle; callers own its
/// lifecycle and should call `Client::shutdown` on exit.
pub async fn connect(config: &MongoConfig) -> Result<Client, ItemStoreError> {
    let client = Client::with_uri_str(&config.uri).await.map_err(store_error)?;
    client
        .database(&config.database)
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(store_error)?;
    tracing::info!(database = %config.database, "connected to mongodb");
    Ok(client)
}

/// Item store over a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoItemStore {
    collection: Collection<ItemDocument>,
}

impl MongoItemStore {
    /// Bind to the `Items` collection of an already-connected database.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(ITEMS_COLLECTION),
        }
    }
}

#[async_trait]
impl ItemStore for MongoItemStore {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn list(&self) -> Result<Vec<Item>, ItemStoreError> {
        let docs: Vec<ItemDocument> = self
            .collection
            .find(doc! {})
            .await
            .map_err(store_error)?
            .try_collect()
            .await
            .map_err(store_error)?;

        docs.into_iter().map(Item::try_from).collect()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get(&self, id: ItemId) -> Result<Option<Item>, ItemStoreError> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(store_error)?
            .map(Item::try_from)
            .transpose()
    }

    #[tracing::instrument(level = "debug", skip(self, item), fields(id = %item.id()))]
    async fn insert(&self, item: Item) -> Result<(), ItemStoreError> {
        self.collection
            .insert_one(ItemDocument::from(&item))
            .await
            .map_err(store_error)?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self, item), fields(id = %item.id()))]
    async fn replace(&self, item: Item) -> Result<(), ItemStoreError> {
        let result = self
            .collection
            .replace_one(id_filter(item.id()), ItemDocument::from(&item))
            .await
            .map_err(store_error)?;
        if result.matched_count == 0 {
            return Err(ItemStoreError::NotFound);
        }
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete(&self, id: ItemId) -> Result<(), ItemStoreError> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(store_error)?;
        if result.deleted_count == 0 {
            return Err(ItemStoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> Item {
        Item::create(
            ItemDetails::new("Bronze Shield", "Armor +100", Decimal::new(1999, 2)),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn document_keeps_every_field() {
        let item = sample_item();
        let doc = ItemDocument::from(&item);

        assert_eq!(doc.id, Uuid::from(item.id()));
        assert_eq!(doc.price, "19.99");
        assert_eq!(Item::try_from(doc).unwrap(), item);
    }

    #[test]
    fn bson_layout_uses_native_uuid_id_and_datetime() {
        let doc = ItemDocument::from(&sample_item());
        let raw = bson::to_document(&doc).unwrap();

        match raw.get("_id") {
            Some(bson::Bson::Binary(bin)) => {
                assert_eq!(bin.subtype, bson::spec::BinarySubtype::Uuid)
            }
            other => panic!("expected binary uuid _id, got {other:?}"),
        }
        assert!(matches!(raw.get("created_at"), Some(bson::Bson::DateTime(_))));
        assert_eq!(raw.get_str("price").unwrap(), "19.99");
        assert!(!raw.contains_key("id"));

        let back: ItemDocument = bson::from_document(raw).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn id_filter_matches_serialized_id() {
        let item = sample_item();
        let raw = bson::to_document(&ItemDocument::from(&item)).unwrap();
        let filter = id_filter(item.id());
        assert_eq!(filter.get("_id"), raw.get("_id"));
    }

    #[test]
    fn undecodable_documents_are_corrupt_not_unavailable() {
        // Records written with a database-generated object id instead of a uuid.
        let legacy = doc! {
            "_id": bson::oid::ObjectId::new(),
            "name": "Potion",
            "description": "Restores a small amount of HG",
            "price": "9",
            "created_at": bson::DateTime::now(),
        };
        let decode = bson::from_document::<ItemDocument>(legacy).unwrap_err();

        match store_error(mongodb::error::Error::from(decode)) {
            ItemStoreError::Corrupt(_) => {}
            other => panic!("expected Corrupt, got {other:?}"),
        }

        let missing_field = bson::from_document::<ItemDocument>(doc! {
            "_id": bson::Uuid::new(),
            "name": "Potion",
        })
        .unwrap_err();
        assert!(matches!(
            store_error(mongodb::error::Error::from(missing_field)),
            ItemStoreError::Corrupt(_)
        ));
    }

    #[test]
    fn io_failures_stay_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        assert!(matches!(
            store_error(mongodb::error::Error::from(io)),
            ItemStoreError::Unavailable(_)
        ));
    }

    #[test]
    fn unparsable_price_is_reported_as_corrupt() {
        let mut doc = ItemDocument::from(&sample_item());
        doc.price = "nineteen".to_string();

        match Item::try_from(doc) {
            Err(ItemStoreError::Corrupt(msg)) => assert!(msg.contains("nineteen")),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }
}
