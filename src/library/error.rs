use libris_db::RecordId;
use libris_http::AppError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub error: &'static str,
}

impl FieldError {
    pub const fn required(field: &'static str) -> Self {
        Self {
            field,
            error: "required",
        }
    }

    pub const fn out_of_range(field: &'static str) -> Self {
        Self {
            field,
            error: "out of range",
        }
    }
}

/// Failures of catalog, registry, ledger and lending operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("invalid input: {}", describe(.details))]
    Validation { details: Vec<FieldError> },

    #[error("book {0} not found")]
    BookNotFound(RecordId),

    #[error("borrower {0} not found")]
    BorrowerNotFound(RecordId),

    #[error("loan {0} not found")]
    LoanNotFound(RecordId),

    #[error("book {0} has no available copies")]
    OutOfStock(RecordId),

    #[error("loan {0} has already been returned")]
    AlreadyReturned(RecordId),

    #[error("storage failure")]
    Storage(#[source] anyhow::Error),
}

fn describe(details: &[FieldError]) -> String {
    details
        .iter()
        .map(|d| format!("{} {}", d.field, d.error))
        .collect::<Vec<_>>()
        .join(", ")
}

impl LibraryError {
    pub fn validation(details: Vec<FieldError>) -> Self {
        Self::Validation { details }
    }

    /// Stable machine-readable code used in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            LibraryError::Validation { .. } => "validation_error",
            LibraryError::BookNotFound(_) => "book_not_found",
            LibraryError::BorrowerNotFound(_) => "borrower_not_found",
            LibraryError::LoanNotFound(_) => "loan_not_found",
            LibraryError::OutOfStock(_) => "out_of_stock",
            LibraryError::AlreadyReturned(_) => "already_returned",
            LibraryError::Storage(_) => "internal_error",
        }
    }
}

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        let message = err.to_string();
        let code = err.code();

        match err {
            LibraryError::Validation { details } => AppError::validation(
                details.iter().map(|d| json!(d)).collect(),
                message,
            ),
            LibraryError::BookNotFound(_)
            | LibraryError::BorrowerNotFound(_)
            | LibraryError::LoanNotFound(_) => AppError::not_found(message).with_code(code),
            LibraryError::OutOfStock(book_id) => AppError::bad_request(message)
                .with_code(code)
                .with_details(vec![json!({ "book_id": book_id })]),
            LibraryError::AlreadyReturned(loan_id) => AppError::bad_request(message)
                .with_code(code)
                .with_details(vec![json!({ "loan_id": loan_id })]),
            LibraryError::Storage(source) => AppError::Internal(source.context(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};

    #[test]
    fn validation_message_lists_fields() {
        let err = LibraryError::validation(vec![
            FieldError::required("title"),
            FieldError::required("author"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: title required, author required"
        );
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (LibraryError::validation(vec![FieldError::required("name")]), StatusCode::BAD_REQUEST),
            (LibraryError::BookNotFound(3), StatusCode::NOT_FOUND),
            (LibraryError::BorrowerNotFound(3), StatusCode::NOT_FOUND),
            (LibraryError::LoanNotFound(3), StatusCode::NOT_FOUND),
            (LibraryError::OutOfStock(3), StatusCode::BAD_REQUEST),
            (LibraryError::AlreadyReturned(3), StatusCode::BAD_REQUEST),
            (
                LibraryError::Storage(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let app_error: AppError = err.into();
            assert_eq!(app_error.into_response().status(), status);
        }
    }
}
