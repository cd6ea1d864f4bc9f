use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::app::services::CatalogError;

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::NotFound => StatusCode::NOT_FOUND.into_response(),
        CatalogError::InvalidIdentifier(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        CatalogError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        CatalogError::BackendUnavailable(msg) => {
            tracing::error!(error = %msg, "item store unavailable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "backend_unavailable", msg)
        }
        CatalogError::Store(msg) => {
            tracing::error!(error = %msg, "item store returned unreadable data");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
