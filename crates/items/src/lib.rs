//! Catalog item domain module.
//!
//! This crate contains the business rules for catalog items, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod item;

pub use item::{Item, ItemDetails, demo_items};
