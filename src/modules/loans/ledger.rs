use chrono::NaiveDate;
use libris_db::{RecordId, Table};
use serde::{Deserialize, Serialize};

use super::models::Loan;
use crate::library::LibraryError;

/// Loan records in the order they were opened.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanLedger {
    loans: Table<Loan>,
}

impl LoanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_loans(&self) -> Vec<Loan> {
        self.loans.iter().cloned().collect()
    }

    pub fn get_loan(&self, id: RecordId) -> Result<&Loan, LibraryError> {
        self.loans.get(id).ok_or(LibraryError::LoanNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    pub fn outstanding_count(&self) -> usize {
        self.loans.iter().filter(|loan| loan.is_outstanding()).count()
    }

    pub(crate) fn open_loan(
        &mut self,
        book_id: RecordId,
        borrower_id: RecordId,
        loan_date: NaiveDate,
        due_date: Option<String>,
    ) -> &Loan {
        self.loans.insert_with(|id| Loan {
            id,
            book_id,
            borrower_id,
            loan_date,
            due_date,
            returned: false,
            return_date: None,
        })
    }

    /// Mark a loan returned. A loan closes at most once.
    pub(crate) fn close_loan(
        &mut self,
        id: RecordId,
        return_date: NaiveDate,
    ) -> Result<&Loan, LibraryError> {
        let loan = self.loans.get_mut(id).ok_or(LibraryError::LoanNotFound(id))?;
        if loan.returned {
            return Err(LibraryError::AlreadyReturned(id));
        }

        loan.returned = true;
        loan.return_date = Some(return_date);
        Ok(loan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn opened_loans_are_outstanding() {
        let mut ledger = LoanLedger::new();
        let loan = ledger.open_loan(1, 7, day(1), Some("2024-03-15".into())).clone();

        assert_eq!(loan.id, 1);
        assert!(!loan.returned);
        assert_eq!(loan.return_date, None);
        assert_eq!(loan.due_date.as_deref(), Some("2024-03-15"));
        assert_eq!(ledger.outstanding_count(), 1);
    }

    #[test]
    fn close_loan_sets_return_date_once() {
        let mut ledger = LoanLedger::new();
        ledger.open_loan(1, 7, day(1), None);

        let closed = ledger.close_loan(1, day(5)).unwrap();
        assert!(closed.returned);
        assert_eq!(closed.return_date, Some(day(5)));

        assert!(matches!(
            ledger.close_loan(1, day(6)),
            Err(LibraryError::AlreadyReturned(1))
        ));
        assert_eq!(ledger.get_loan(1).unwrap().return_date, Some(day(5)));
        assert_eq!(ledger.outstanding_count(), 0);
    }

    #[test]
    fn unknown_loan_is_not_found() {
        let mut ledger = LoanLedger::new();
        assert!(matches!(
            ledger.close_loan(4, day(1)),
            Err(LibraryError::LoanNotFound(4))
        ));
        assert!(matches!(ledger.get_loan(4), Err(LibraryError::LoanNotFound(4))));
    }
}
