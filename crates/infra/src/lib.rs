//! Infrastructure layer: item persistence backends and configuration.

pub mod config;
pub mod item_store;
