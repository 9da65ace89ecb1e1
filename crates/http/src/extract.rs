//! Request extractors that report failures in the standard error envelope.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body decoded into a typed schema.
///
/// Unlike [`axum::Json`], a body that does not match the schema (missing
/// content type, malformed JSON, wrong field types) is answered with a
/// `400 invalid_payload` error in the usual envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(reason = %rejection.body_text(), "rejected request payload");

    AppError::bad_request(rejection.body_text())
        .with_code("invalid_payload")
        .with_details(vec![serde_json::json!({
            "status": rejection.status().as_u16(),
        })])
}

/// Path parameters decoded into a typed value, e.g. a record id.
///
/// A segment that does not parse (`/api/books/abc`) becomes `400 invalid_payload`
/// instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct PathParams<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParams(value)),
            Err(rejection) => Err(path_rejection_to_error(rejection)),
        }
    }
}

fn path_rejection_to_error(rejection: PathRejection) -> AppError {
    tracing::debug!(reason = %rejection.body_text(), "rejected path parameters");

    AppError::bad_request(rejection.body_text())
        .with_code("invalid_payload")
        .with_details(vec![serde_json::json!({
            "status": rejection.status().as_u16(),
            "location": "path",
        })])
}
