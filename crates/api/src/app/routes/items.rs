use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use catalog_core::ItemId;

use crate::app::services::{CatalogError, CatalogService};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/name", get(list_items_by_name))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
}

fn parse_id(raw: &str) -> Result<ItemId, axum::response::Response> {
    raw.parse::<ItemId>()
        .map_err(|e| errors::catalog_error_to_response(CatalogError::from(e)))
}

pub async fn list_items(
    Extension(catalog): Extension<Arc<CatalogService>>,
) -> axum::response::Response {
    match catalog.list_items().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn list_items_by_name(
    Extension(catalog): Extension<Arc<CatalogService>>,
    Query(query): Query<dto::NameQuery>,
) -> axum::response::Response {
    match catalog.list_items_by_name(query.name.as_deref()).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(catalog): Extension<Arc<CatalogService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match catalog.get_item(id).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn create_item(
    Extension(catalog): Extension<Arc<CatalogService>>,
    Json(body): Json<dto::CreateItemRequest>,
) -> axum::response::Response {
    match catalog.create_item(body).await {
        Ok(view) => (
            StatusCode::CREATED,
            [(header::LOCATION, format!("/items/{}", view.id))],
            Json(view),
        )
            .into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(catalog): Extension<Arc<CatalogService>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateItemRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match catalog.update_item(id, body).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(catalog): Extension<Arc<CatalogService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match catalog.delete_item(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}
