use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use libris_db::RecordId;
use libris_http::{ApiResult, PathParams, Payload};

use super::models::{Borrower, CreateBorrower};
use crate::library::LibraryService;

/// HTTP routes for the Borrowers module, mounted under `/api/borrowers`.
pub fn router(library: LibraryService) -> Router {
    Router::new()
        .route("/", get(list_borrowers).post(create_borrower))
        .route("/health", get(health_check))
        .route("/{id}", get(get_borrower))
        .with_state(library)
}

async fn health_check() -> &'static str {
    "borrowers module is healthy"
}

async fn list_borrowers(State(library): State<LibraryService>) -> Json<Vec<Borrower>> {
    Json(library.list_borrowers().await)
}

async fn create_borrower(
    State(library): State<LibraryService>,
    Payload(request): Payload<CreateBorrower>,
) -> ApiResult<(StatusCode, Json<Borrower>)> {
    let borrower = library.add_borrower(request).await?;
    Ok((StatusCode::CREATED, Json(borrower)))
}

async fn get_borrower(
    State(library): State<LibraryService>,
    PathParams(id): PathParams<RecordId>,
) -> ApiResult<Json<Borrower>> {
    Ok(Json(library.get_borrower(id).await?))
}
