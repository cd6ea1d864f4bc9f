use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, ItemId};

/// The client-editable part of an item: everything except identity and
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl ItemDetails {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.price < Decimal::ZERO {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(())
    }
}

/// Entity: a catalog item.
///
/// `id` and `created_at` are fixed at creation; only the details can be
/// replaced afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    details: ItemDetails,
    created_at: DateTime<Utc>,
}

impl Item {
    /// Create a brand-new item with a freshly generated identifier.
    ///
    /// `created_at` is truncated to milliseconds, the finest precision every
    /// store backend keeps.
    pub fn create(details: ItemDetails, now: DateTime<Utc>) -> DomainResult<Self> {
        details.validate()?;
        Ok(Self {
            id: ItemId::new(),
            details,
            created_at: now.trunc_subsecs(3),
        })
    }

    /// Rebuild an item from persisted state. No validation is applied.
    pub fn restore(id: ItemId, details: ItemDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            details,
            created_at,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn price(&self) -> Decimal {
        self.details.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    /// Replace name, description and price in full.
    pub fn revise(&mut self, details: ItemDetails) -> DomainResult<()> {
        details.validate()?;
        self.details = details;
        Ok(())
    }

    /// Case-insensitive substring match on the name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.details
            .name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

/// Starter catalog used to seed the in-memory store in dev setups.
pub fn demo_items(now: DateTime<Utc>) -> Vec<Item> {
    [
        ("Potion", "Restores a small amount of HG", 9),
        ("Iron Sword", "Iron", 20),
        ("Bronze Shield", "Armor +100", 19),
    ]
    .into_iter()
    .map(|(name, description, price)| Item {
        id: ItemId::new(),
        details: ItemDetails::new(name, description, Decimal::from(price)),
        created_at: now.trunc_subsecs(3),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn potion() -> ItemDetails {
        ItemDetails::new("Potion", "Heals", Decimal::from(9))
    }

    #[test]
    fn create_assigns_identity_and_millisecond_timestamp() {
        let now = test_time();
        let item = Item::create(potion(), now).unwrap();

        assert_eq!(item.name(), "Potion");
        assert_eq!(item.description(), "Heals");
        assert_eq!(item.price(), Decimal::from(9));
        assert_eq!(item.created_at(), now.trunc_subsecs(3));
        assert_eq!(item.created_at().timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn create_generates_distinct_ids() {
        let a = Item::create(potion(), test_time()).unwrap();
        let b = Item::create(potion(), test_time()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn create_rejects_blank_name() {
        let err = Item::create(ItemDetails::new("   ", "", Decimal::ONE), test_time()).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("name")),
            _ => panic!("Expected Validation error for blank name"),
        }
    }

    #[test]
    fn create_rejects_negative_price() {
        let err = Item::create(ItemDetails::new("Potion", "", Decimal::new(-1, 2)), test_time())
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("price")),
            _ => panic!("Expected Validation error for negative price"),
        }
    }

    #[test]
    fn zero_price_and_empty_description_are_allowed() {
        let item = Item::create(ItemDetails::new("Rock", "", Decimal::ZERO), test_time()).unwrap();
        assert_eq!(item.description(), "");
        assert_eq!(item.price(), Decimal::ZERO);
    }

    #[test]
    fn revise_keeps_identity_and_creation_time() {
        let mut item = Item::create(potion(), test_time()).unwrap();
        let id = item.id();
        let created_at = item.created_at();

        item.revise(ItemDetails::new("Hi-Potion", "Heals more", Decimal::new(1250, 2)))
            .unwrap();

        assert_eq!(item.id(), id);
        assert_eq!(item.created_at(), created_at);
        assert_eq!(item.name(), "Hi-Potion");
        assert_eq!(item.description(), "Heals more");
        assert_eq!(item.price(), Decimal::new(1250, 2));
    }

    #[test]
    fn revise_with_invalid_details_leaves_item_untouched() {
        let mut item = Item::create(potion(), test_time()).unwrap();
        let before = item.clone();

        assert!(item.revise(ItemDetails::new("", "x", Decimal::ONE)).is_err());
        assert_eq!(item, before);
    }

    #[test]
    fn name_contains_ignores_case() {
        let items = demo_items(test_time());
        let matches: Vec<_> = items
            .iter()
            .filter(|i| i.name_contains("potion"))
            .map(|i| i.name())
            .collect();
        assert_eq!(matches, vec!["Potion"]);

        assert!(items[1].name_contains("SWORD"));
        assert!(!items[2].name_contains("sword"));
    }

    #[test]
    fn demo_items_are_valid() {
        let items = demo_items(test_time());
        assert_eq!(items.len(), 3);
        for item in &items {
            item.details().validate().unwrap();
        }
    }

    #[test]
    fn demo_items_carry_the_seed_catalog() {
        let items = demo_items(test_time());
        let seeded: Vec<_> = items
            .iter()
            .map(|i| (i.name(), i.description(), i.price()))
            .collect();
        assert_eq!(
            seeded,
            vec![
                ("Potion", "Restores a small amount of HG", Decimal::from(9)),
                ("Iron Sword", "Iron", Decimal::from(20)),
                ("Bronze Shield", "Armor +100", Decimal::from(19)),
            ]
        );
    }

    proptest! {
        #[test]
        fn every_substring_of_the_name_matches_in_any_case(
            name in "[a-zA-Z ]{1,24}",
            start in 0usize..24,
            len in 0usize..24,
        ) {
            let item = Item::restore(
                ItemId::new(),
                ItemDetails::new(name.clone(), "", Decimal::ONE),
                test_time(),
            );
            let start = start.min(name.len());
            let end = (start + len).min(name.len());
            let needle = &name[start..end];

            prop_assert!(item.name_contains(needle));
            prop_assert!(item.name_contains(&needle.to_uppercase()));
            prop_assert!(item.name_contains(&needle.to_lowercase()));
        }
    }
}
