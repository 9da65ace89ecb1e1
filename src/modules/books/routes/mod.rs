use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use libris_db::RecordId;
use libris_http::{ApiResult, PathParams, Payload};

use super::models::{Book, CreateBook};
use crate::library::LibraryService;

/// HTTP routes for the Books module, mounted under `/api/books`.
pub fn router(library: LibraryService) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/health", get(health_check))
        .route("/{id}", get(get_book))
        .with_state(library)
}

async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(State(library): State<LibraryService>) -> Json<Vec<Book>> {
    Json(library.list_books().await)
}

async fn create_book(
    State(library): State<LibraryService>,
    Payload(request): Payload<CreateBook>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let book = library.add_book(request).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn get_book(
    State(library): State<LibraryService>,
    PathParams(id): PathParams<RecordId>,
) -> ApiResult<Json<Book>> {
    Ok(Json(library.get_book(id).await?))
}
