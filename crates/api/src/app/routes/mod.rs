use axum::Router;

pub mod items;
pub mod system;

/// Router for the catalog endpoints.
pub fn router() -> Router {
    Router::new().nest("/items", items::router())
}
