use libris_db::{RecordId, Table};
use serde::{Deserialize, Serialize};

use super::models::{Book, CreateBook};
use crate::library::LibraryError;

/// Book records and their available-copy counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    books: Table<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_book(&mut self, request: CreateBook) -> Result<Book, LibraryError> {
        let new_book = request.validate()?;
        let book = self.books.insert_with(|id| new_book.into_book(id));
        Ok(book.clone())
    }

    /// Books in the order they were added.
    pub fn list_books(&self) -> Vec<Book> {
        self.books.iter().cloned().collect()
    }

    pub fn get_book(&self, id: RecordId) -> Result<&Book, LibraryError> {
        self.books.get(id).ok_or(LibraryError::BookNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Shift a book's available copies by `delta`, returning the new count.
    ///
    /// Only the lending workflow moves stock. The count never drops below zero.
    pub(crate) fn adjust_copies(&mut self, id: RecordId, delta: i32) -> Result<u32, LibraryError> {
        let book = self.books.get_mut(id).ok_or(LibraryError::BookNotFound(id))?;

        let adjusted = book
            .available_copies
            .checked_add_signed(delta)
            .ok_or_else(|| {
                if delta < 0 {
                    LibraryError::OutOfStock(id)
                } else {
                    LibraryError::Storage(anyhow::anyhow!(
                        "available copies of book {id} would overflow"
                    ))
                }
            })?;

        book.available_copies = adjusted;
        Ok(adjusted)
    }
}

/// Titles offered to a fresh installation when sample data is enabled.
pub fn sample_catalog() -> Vec<CreateBook> {
    vec![
        CreateBook::new("Don Quixote", "Miguel de Cervantes")
            .with_isbn("12345")
            .with_year(1605)
            .with_categories("Classic")
            .with_quantity(3),
        CreateBook::new("The Little Prince", "Antoine de Saint-Exupéry")
            .with_isbn("67890")
            .with_year(1943)
            .with_categories("Children")
            .with_quantity(5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn added_books_get_sequential_ids_and_keep_order() {
        let mut catalog = Catalog::new();
        let first = catalog.add_book(CreateBook::new("Emma", "Jane Austen")).unwrap();
        let second = catalog
            .add_book(CreateBook::new("Persuasion", "Jane Austen").with_quantity(2))
            .unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(second.available_copies, 2);

        let titles: Vec<_> = catalog.list_books().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["Emma", "Persuasion"]);
    }

    #[test]
    fn invalid_book_is_not_stored() {
        let mut catalog = Catalog::new();
        let err = catalog.add_book(CreateBook::default()).unwrap_err();
        assert!(matches!(err, LibraryError::Validation { .. }));
        assert!(catalog.is_empty());

        let book = catalog.add_book(CreateBook::new("Emma", "Jane Austen")).unwrap();
        assert_eq!(book.id, 1);
    }

    #[test]
    fn get_book_reports_missing_id() {
        let catalog = Catalog::new();
        assert!(matches!(
            catalog.get_book(42),
            Err(LibraryError::BookNotFound(42))
        ));
    }

    #[test]
    fn adjust_copies_never_goes_negative() {
        let mut catalog = Catalog::new();
        let book = catalog
            .add_book(CreateBook::new("Emma", "Jane Austen").with_quantity(1))
            .unwrap();

        assert_eq!(catalog.adjust_copies(book.id, -1).unwrap(), 0);
        assert!(matches!(
            catalog.adjust_copies(book.id, -1),
            Err(LibraryError::OutOfStock(_))
        ));
        assert_eq!(catalog.get_book(book.id).unwrap().available_copies, 0);
        assert_eq!(catalog.adjust_copies(book.id, 1).unwrap(), 1);
    }

    #[test]
    fn adjust_copies_of_unknown_book_fails() {
        let mut catalog = Catalog::new();
        assert!(matches!(
            catalog.adjust_copies(9, 1),
            Err(LibraryError::BookNotFound(9))
        ));
    }

    #[test]
    fn sample_catalog_is_valid() {
        let mut catalog = Catalog::new();
        for request in sample_catalog() {
            catalog.add_book(request).unwrap();
        }
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get_book(1).unwrap().available_copies, 3);
        assert_eq!(catalog.get_book(2).unwrap().available_copies, 5);
    }
}
