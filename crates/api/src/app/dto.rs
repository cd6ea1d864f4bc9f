use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_core::ItemId;
use catalog_items::{Item, ItemDetails};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /items`. `price` accepts a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
}

/// Body of `PUT /items/{id}`: a full replacement of the editable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
}

impl CreateItemRequest {
    pub fn into_details(self) -> ItemDetails {
        ItemDetails::new(self.name, self.description, self.price)
    }
}

impl UpdateItemRequest {
    pub fn into_details(self) -> ItemDetails {
        ItemDetails::new(self.name, self.description, self.price)
    }
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

/// Externally visible projection of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            price: item.price(),
            created_at: item.created_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_accepts_numeric_and_string_prices() {
        let req: CreateItemRequest =
            serde_json::from_value(json!({"name": "Potion", "description": "Heals", "price": 9}))
                .unwrap();
        assert_eq!(req.price, Decimal::from(9));

        let req: CreateItemRequest =
            serde_json::from_value(json!({"name": "Potion", "price": "19.99"})).unwrap();
        assert_eq!(req.price, Decimal::new(1999, 2));
        assert_eq!(req.description, "");
    }

    #[test]
    fn create_request_requires_name_and_price() {
        assert!(serde_json::from_value::<CreateItemRequest>(json!({"price": 1})).is_err());
        assert!(serde_json::from_value::<CreateItemRequest>(json!({"name": "Potion"})).is_err());
    }

    #[test]
    fn item_view_serializes_all_fields() {
        let item = Item::create(
            ItemDetails::new("Potion", "Heals", Decimal::new(950, 2)),
            Utc::now(),
        )
        .unwrap();
        let value = serde_json::to_value(ItemView::from(&item)).unwrap();

        assert_eq!(value["id"], json!(item.id().to_string()));
        assert_eq!(value["name"], "Potion");
        assert_eq!(value["description"], "Heals");
        assert_eq!(value["price"].as_f64(), Some(9.5));
        assert_eq!(value["created_at"], json!(item.created_at()));
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
