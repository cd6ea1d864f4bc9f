//! Item persistence boundary.
//!
//! One async trait, two interchangeable backends: an in-process ordered list
//! for dev/tests and a MongoDB collection for production.

pub mod in_memory;
pub mod mongo;
pub mod r#trait;

pub use in_memory::InMemoryItemStore;
pub use mongo::{ITEMS_COLLECTION, ItemDocument, MongoItemStore};
pub use r#trait::{ItemStore, ItemStoreError};
