//! Checkout and return: the only operations that move stock between the
//! catalog and the loan ledger.
//!
//! Both operations check every precondition before touching state, so a
//! refused request leaves the [`Library`] exactly as it was. Callers must hold
//! exclusive access to the library for the duration of a call.

use chrono::NaiveDate;
use libris_db::RecordId;

use super::models::{CheckoutRequest, Loan};
use crate::library::{Library, LibraryError};

/// Lend one copy of a book to a registered borrower.
pub fn checkout(
    library: &mut Library,
    request: CheckoutRequest,
    today: NaiveDate,
) -> Result<Loan, LibraryError> {
    let CheckoutRequest {
        book_id,
        borrower_id,
        due_date,
    } = request;

    let available = library.catalog.get_book(book_id)?.available_copies;
    library.borrowers.get_borrower(borrower_id)?;

    if available == 0 {
        tracing::warn!(book_id, borrower_id, "checkout refused: no copies available");
        return Err(LibraryError::OutOfStock(book_id));
    }

    let remaining = library.catalog.adjust_copies(book_id, -1)?;
    let loan = library
        .ledger
        .open_loan(book_id, borrower_id, today, due_date)
        .clone();

    tracing::info!(
        loan_id = loan.id,
        book_id,
        borrower_id,
        remaining,
        "book checked out"
    );
    Ok(loan)
}

/// Close an outstanding loan and put the copy back on the shelf.
///
/// If the book has since left the catalog the loan still closes.
pub fn return_loan(
    library: &mut Library,
    loan_id: RecordId,
    today: NaiveDate,
) -> Result<Loan, LibraryError> {
    let loan = library.ledger.get_loan(loan_id)?;
    if loan.returned {
        tracing::warn!(loan_id, "return refused: loan already returned");
        return Err(LibraryError::AlreadyReturned(loan_id));
    }
    let book_id = loan.book_id;

    match library.catalog.adjust_copies(book_id, 1) {
        Ok(available) => {
            tracing::debug!(book_id, available, "copy back on the shelf");
        }
        Err(LibraryError::BookNotFound(_)) => {
            tracing::warn!(loan_id, book_id, "returned loan references a missing book");
        }
        Err(err) => return Err(err),
    }

    let loan = library.ledger.close_loan(loan_id, today)?.clone();
    tracing::info!(loan_id, book_id, "loan returned");
    Ok(loan)
}
