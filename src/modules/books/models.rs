use libris_db::{Record, RecordId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::library::{FieldError, LibraryError};
use crate::utils::optional_integer_or_numeric_string;

/// A catalogued title and the number of its copies currently on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Unique identifier for the book
    #[schema(value_type = u64)]
    pub id: RecordId,
    pub title: String,
    pub author: String,
    /// Empty when unknown
    pub isbn: String,
    /// Publication year
    pub year: Option<i32>,
    /// Free-text categories, e.g. "Classic, Fiction"
    pub categories: String,
    /// Copies not currently on loan
    pub available_copies: u32,
}

impl Record for Book {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Request model for adding a book to the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateBook {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    /// Publication year, as a number or a numeric string
    #[serde(default, deserialize_with = "optional_integer_or_numeric_string")]
    #[schema(value_type = Option<i32>)]
    pub year: Option<i32>,
    #[serde(default)]
    pub categories: Option<String>,
    /// Initial number of copies. Numeric strings are accepted; anything
    /// non-numeric falls back to 1.
    #[serde(default, deserialize_with = "lenient_integer")]
    #[schema(value_type = Option<i64>)]
    pub quantity: Option<i64>,
}

/// A [`CreateBook`] that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: Option<i32>,
    pub categories: String,
    pub copies: u32,
}

impl NewBook {
    pub fn into_book(self, id: RecordId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            year: self.year,
            categories: self.categories,
            available_copies: self.copies,
        }
    }
}

const DEFAULT_COPIES: u32 = 1;

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            ..Self::default()
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    pub fn with_categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = Some(categories.into());
        self
    }

    pub fn validate(self) -> Result<NewBook, LibraryError> {
        let mut details = Vec::new();

        let title = required(self.title);
        if title.is_none() {
            details.push(FieldError::required("title"));
        }
        let author = required(self.author);
        if author.is_none() {
            details.push(FieldError::required("author"));
        }

        let copies = match self.quantity {
            None => Some(DEFAULT_COPIES),
            Some(n) => u32::try_from(n).ok(),
        };
        if copies.is_none() {
            details.push(FieldError::out_of_range("quantity"));
        }

        match (title, author, copies) {
            (Some(title), Some(author), Some(copies)) if details.is_empty() => Ok(NewBook {
                title,
                author,
                isbn: self.isbn.unwrap_or_default(),
                year: self.year,
                categories: self.categories.unwrap_or_default(),
                copies,
            }),
            _ => Err(LibraryError::validation(details)),
        }
    }
}

/// Accept a JSON integer, a float (truncated) or a numeric string; anything
/// else reads as absent.
fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;

    Ok(match raw {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}
