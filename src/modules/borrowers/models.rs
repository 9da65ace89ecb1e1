use libris_db::{Record, RecordId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::library::{FieldError, LibraryError};

/// A registered library member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Borrower {
    #[schema(value_type = u64)]
    pub id: RecordId,
    pub name: String,
    /// Empty when not provided
    pub email: String,
    /// Empty when not provided
    pub phone: String,
}

impl Record for Borrower {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Request model for registering a borrower.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateBorrower {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl CreateBorrower {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Build the record for `id`, rejecting a missing or blank name.
    pub fn into_borrower(self, id: RecordId) -> Result<Borrower, LibraryError> {
        let name = self
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| LibraryError::validation(vec![FieldError::required("name")]))?;

        Ok(Borrower {
            id,
            name,
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
        })
    }
}
