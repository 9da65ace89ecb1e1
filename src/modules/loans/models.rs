use chrono::NaiveDate;
use libris_db::{Record, RecordId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::integer_or_numeric_string;

/// One copy of a book lent to a borrower.
///
/// `return_date` is set exactly when `returned` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Loan {
    #[schema(value_type = u64)]
    pub id: RecordId,
    #[schema(value_type = u64)]
    pub book_id: RecordId,
    #[schema(value_type = u64)]
    pub borrower_id: RecordId,
    /// Date the copy left the shelf
    pub loan_date: NaiveDate,
    /// Caller-supplied due date, stored as given
    pub due_date: Option<String>,
    pub returned: bool,
    pub return_date: Option<NaiveDate>,
}

impl Record for Loan {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Loan {
    pub fn is_outstanding(&self) -> bool {
        !self.returned
    }
}

/// Request model for lending a book.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    /// Book to lend, as a number or a numeric string
    #[serde(deserialize_with = "integer_or_numeric_string")]
    #[schema(value_type = u64)]
    pub book_id: RecordId,
    /// Registered borrower, as a number or a numeric string
    #[serde(deserialize_with = "integer_or_numeric_string")]
    #[schema(value_type = u64)]
    pub borrower_id: RecordId,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl CheckoutRequest {
    pub fn new(book_id: RecordId, borrower_id: RecordId) -> Self {
        Self {
            book_id,
            borrower_id,
            due_date: None,
        }
    }

    pub fn due(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}
