use std::sync::Arc;

use axum::{
    extract::OriginalUri,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::books::BookService;

pub mod books;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// GET / - welcome payload listing the available endpoints.
async fn welcome() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to the Bookshelf REST API!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "allBooks": "GET /api/books",
            "singleBook": "GET /api/books/:id",
            "createBook": "POST /api/books",
            "updateBook": "PUT /api/books/:id",
            "deleteBook": "DELETE /api/books/:id"
        }
    }))
}

/// Catch-all for unmatched routes: uniform 404 envelope echoing the URL.
async fn not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Route not found",
            "requestedUrl": uri.to_string()
        })),
    )
}

/// Build the full application router: welcome, health, book CRUD, fallback.
pub fn build_router(books: Arc<BookService>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/api/books", get(books::list).post(books::create))
        .route(
            "/api/books/:id",
            get(books::get_one).put(books::update).delete(books::delete_one),
        )
        .fallback(not_found)
        .with_state(books)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request with method and path, at INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // response event carries status and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
