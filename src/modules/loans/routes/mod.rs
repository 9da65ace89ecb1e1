use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use libris_db::RecordId;
use libris_http::{ApiResult, PathParams, Payload};

use super::models::{CheckoutRequest, Loan};
use crate::library::LibraryService;

/// HTTP routes for the Loans module, mounted under `/api/loans`.
pub fn router(library: LibraryService) -> Router {
    Router::new()
        .route("/", get(list_loans).post(checkout))
        .route("/health", get(health_check))
        .route("/{id}", get(get_loan))
        .route("/{id}/return", post(return_loan))
        .with_state(library)
}

async fn health_check() -> &'static str {
    "loans module is healthy"
}

async fn list_loans(State(library): State<LibraryService>) -> Json<Vec<Loan>> {
    Json(library.list_loans().await)
}

async fn checkout(
    State(library): State<LibraryService>,
    Payload(request): Payload<CheckoutRequest>,
) -> ApiResult<(StatusCode, Json<Loan>)> {
    let loan = library.checkout(request).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

async fn get_loan(
    State(library): State<LibraryService>,
    PathParams(id): PathParams<RecordId>,
) -> ApiResult<Json<Loan>> {
    Ok(Json(library.get_loan(id).await?))
}

async fn return_loan(
    State(library): State<LibraryService>,
    PathParams(id): PathParams<RecordId>,
) -> ApiResult<Json<Loan>> {
    Ok(Json(library.return_loan(id).await?))
}
