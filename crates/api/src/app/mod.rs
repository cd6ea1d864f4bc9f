//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: catalog use cases and store wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::CatalogService;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(catalog: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router().layer(Extension(catalog)))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_requests)))
}
