use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use common::types::ApiResponse;
use models::book::{Book, BookPatch, NewBook};
use service::books::BookService;

use crate::errors::ApiError;

/// GET /api/books - the full collection with its count.
pub async fn list(
    State(books): State<Arc<BookService>>,
) -> Result<Json<ApiResponse<Vec<Book>>>, ApiError> {
    let items = books.list().await;
    info!(count = items.len(), "list books");
    let count = items.len();
    Ok(Json(ApiResponse::list(items, count)))
}

/// GET /api/books/:id
pub async fn get_one(
    State(books): State<Arc<BookService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let book = books
        .get(&id)
        .await
        .map_err(|e| ApiError::from_service(e, "Error retrieving book"))?;
    Ok(Json(ApiResponse::ok(book)))
}

/// POST /api/books - create from `{title, author}`.
///
/// The body is taken as a raw value so malformed payloads (wrong types,
/// missing fields) surface as a 400 envelope instead of the extractor's
/// default rejection.
pub async fn create(
    State(books): State<Arc<BookService>>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<ApiResponse<Book>>), ApiError> {
    let input: NewBook = serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let created = books
        .create(input)
        .await
        .map_err(|e| ApiError::from_service(e, "Error creating book"))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// PUT /api/books/:id - merge `{title?, author?}` onto the record.
pub async fn update(
    State(books): State<Arc<BookService>>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let patch: BookPatch = serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let updated = books
        .update(&id, patch)
        .await
        .map_err(|e| ApiError::from_service(e, "Error updating book"))?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/books/:id - returns the removed record.
pub async fn delete_one(
    State(books): State<Arc<BookService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let removed = books
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_service(e, "Error deleting book"))?;
    Ok(Json(ApiResponse::ok(removed)))
}
