use libris_db::{RecordId, Table};
use serde::{Deserialize, Serialize};

use super::models::{Borrower, CreateBorrower};
use crate::library::LibraryError;

/// Borrower identity records. Entries are never modified once created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BorrowerRegistry {
    borrowers: Table<Borrower>,
}

impl BorrowerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_borrower(&mut self, request: CreateBorrower) -> Result<Borrower, LibraryError> {
        self.borrowers
            .try_insert_with(|id| request.into_borrower(id))
            .cloned()
    }

    pub fn list_borrowers(&self) -> Vec<Borrower> {
        self.borrowers.iter().cloned().collect()
    }

    pub fn get_borrower(&self, id: RecordId) -> Result<&Borrower, LibraryError> {
        self.borrowers
            .get(id)
            .ok_or(LibraryError::BorrowerNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.borrowers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.borrowers.is_empty()
    }
}
