//! Library state and the shared handle every module works through.

mod error;

pub use error::{FieldError, LibraryError};

use std::{path::Path, sync::Arc};

use chrono::NaiveDate;
use libris_db::{RecordId, SnapshotFile};
use libris_kernel::settings::StorageSettings;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::modules::books::models::{Book, CreateBook};
use crate::modules::books::store::{sample_catalog, Catalog};
use crate::modules::borrowers::models::{Borrower, CreateBorrower};
use crate::modules::borrowers::store::BorrowerRegistry;
use crate::modules::loans::ledger::LoanLedger;
use crate::modules::loans::models::{CheckoutRequest, Loan};
use crate::modules::loans::workflow;
use crate::utils::{Clock, SystemClock};

/// Every record the service owns. Persisted as one unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub borrowers: BorrowerRegistry,
    #[serde(default)]
    pub ledger: LoanLedger,
}

/// Record counts reported by the storage module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LibraryStats {
    pub books: usize,
    pub borrowers: usize,
    pub loans: usize,
    pub outstanding_loans: usize,
}

struct Shared {
    state: RwLock<Library>,
    snapshot: Option<SnapshotFile>,
    clock: Arc<dyn Clock>,
}

/// Cloneable handle to the library.
///
/// Reads share a lock and always see a complete state. Writes, checkout and
/// return included, run one at a time. With a snapshot configured a write is
/// applied to a copy, saved, and only then made visible.
#[derive(Clone)]
pub struct LibraryService {
    shared: Arc<Shared>,
}

impl LibraryService {
    pub fn new(snapshot: Option<SnapshotFile>, clock: Arc<dyn Clock>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(Library::default()),
                snapshot,
                clock,
            }),
        }
    }

    /// Purely in-process state using the system clock.
    pub fn in_memory() -> Self {
        Self::new(None, Arc::new(SystemClock))
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        let snapshot = settings.snapshot_path.as_ref().map(SnapshotFile::new);
        Self::new(snapshot, Arc::new(SystemClock))
    }

    /// Snapshot location, if state outlives the process.
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.shared.snapshot.as_ref().map(SnapshotFile::path)
    }

    /// Replace in-memory state with the snapshot on disk. Returns whether one was found.
    pub async fn restore(&self) -> anyhow::Result<bool> {
        let Some(snapshot) = &self.shared.snapshot else {
            return Ok(false);
        };

        match snapshot.load::<Library>().await? {
            Some(library) => {
                *self.shared.state.write().await = library;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Write the current state to the snapshot, if one is configured.
    pub async fn flush(&self) -> anyhow::Result<()> {
        let Some(snapshot) = &self.shared.snapshot else {
            return Ok(());
        };

        let state = self.shared.state.read().await;
        snapshot.save(&*state).await
    }

    /// Add the sample books when the catalog is empty. Returns how many were added.
    pub async fn seed_sample_catalog(&self) -> Result<usize, LibraryError> {
        self.write(|library, _| {
            if !library.catalog.is_empty() {
                return Ok(0);
            }

            let samples = sample_catalog();
            let count = samples.len();
            for request in samples {
                library.catalog.add_book(request)?;
            }
            Ok(count)
        })
        .await
    }

    pub async fn stats(&self) -> LibraryStats {
        self.read(|library| LibraryStats {
            books: library.catalog.len(),
            borrowers: library.borrowers.len(),
            loans: library.ledger.len(),
            outstanding_loans: library.ledger.outstanding_count(),
        })
        .await
    }

    async fn read<T>(&self, f: impl FnOnce(&Library) -> T) -> T {
        let state = self.shared.state.read().await;
        f(&*state)
    }

    async fn write<T>(
        &self,
        f: impl FnOnce(&mut Library, NaiveDate) -> Result<T, LibraryError>,
    ) -> Result<T, LibraryError> {
        let today = self.shared.clock.today();
        let mut state = self.shared.state.write().await;

        let Some(snapshot) = &self.shared.snapshot else {
            return f(&mut *state, today);
        };

        let mut next = (*state).clone();
        let output = f(&mut next, today)?;
        snapshot.save(&next).await.map_err(LibraryError::Storage)?;
        *state = next;
        Ok(output)
    }

    pub async fn add_book(&self, request: CreateBook) -> Result<Book, LibraryError> {
        let book = self
            .write(|library, _| library.catalog.add_book(request))
            .await?;
        tracing::info!(book_id = book.id, copies = book.available_copies, "book added");
        Ok(book)
    }

    pub async fn list_books(&self) -> Vec<Book> {
        self.read(|library| library.catalog.list_books()).await
    }

    pub async fn get_book(&self, id: RecordId) -> Result<Book, LibraryError> {
        self.read(|library| library.catalog.get_book(id).cloned())
            .await
    }

    pub async fn add_borrower(&self, request: CreateBorrower) -> Result<Borrower, LibraryError> {
        let borrower = self
            .write(|library, _| library.borrowers.add_borrower(request))
            .await?;
        tracing::info!(borrower_id = borrower.id, "borrower registered");
        Ok(borrower)
    }

    pub async fn list_borrowers(&self) -> Vec<Borrower> {
        self.read(|library| library.borrowers.list_borrowers())
            .await
    }

    pub async fn get_borrower(&self, id: RecordId) -> Result<Borrower, LibraryError> {
        self.read(|library| library.borrowers.get_borrower(id).cloned())
            .await
    }

    pub async fn list_loans(&self) -> Vec<Loan> {
        self.read(|library| library.ledger.list_loans()).await
    }

    pub async fn get_loan(&self, id: RecordId) -> Result<Loan, LibraryError> {
        self.read(|library| library.ledger.get_loan(id).cloned())
            .await
    }

    pub async fn checkout(&self, request: CheckoutRequest) -> Result<Loan, LibraryError> {
        self.write(|library, today| workflow::checkout(library, request, today))
            .await
    }

    pub async fn return_loan(&self, loan_id: RecordId) -> Result<Loan, LibraryError> {
        self.write(|library, today| workflow::return_loan(library, loan_id, today))
            .await
    }
}
