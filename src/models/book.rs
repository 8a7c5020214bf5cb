//! Book model and its wire representations.
//!
//! `Book` is the persisted row. `BookView` is what clients send on creation and
//! receive on every read; `BookPatch` is the partial-update body and refuses any
//! field other than `title` and `author`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::AppError;

/// Default page size for listings
pub const DEFAULT_LIST_COUNT: i64 = 10;

/// Books inserted when the catalog starts empty
pub const DEFAULT_BOOKS: [(&str, &str); 3] = [
    ("The Great Gatsby", "F. Scott Fitzgerald"),
    ("1984", "George Orwell"),
    ("Pride and Prejudice", "Jane Austen"),
];

/// Book row as stored in the `books` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
}

/// Book as exchanged over the API.
///
/// `id` is ignored on input (the store assigns it) and always set on output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookView {
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        Self {
            id: Some(book.id),
            title: book.title,
            author: book.author,
        }
    }
}

/// Partial update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookPatch {
    /// Apply the patch to a stored book.
    ///
    /// Absent fields and empty strings leave the current value untouched.
    pub fn apply(&self, mut book: Book) -> Book {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            book.title = title.to_string();
        }
        if let Some(author) = self.author.as_deref().filter(|a| !a.is_empty()) {
            book.author = author.to_string();
        }
        book
    }
}

/// Column a listing is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Title,
    Author,
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "title" => Ok(SortKey::Title),
            "author" => Ok(SortKey::Author),
            _ => Err(AppError::BadRequest(
                "Invalid sort parameter. Must be one of: id, title, author".to_string(),
            )),
        }
    }
}

impl SortKey {
    /// SQL column name; only these three literals ever reach a query string.
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Title => "title",
            SortKey::Author => "author",
        }
    }
}

fn default_count() -> i64 {
    DEFAULT_LIST_COUNT
}

/// Listing query parameters
///
/// `sort` stays a raw string here so that an unknown column is reported on its
/// own (400) instead of as a malformed query string.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookListQuery {
    /// Maximum number of books returned (default: 10)
    #[serde(default = "default_count")]
    #[validate(range(min = 1, message = "count must be a positive integer"))]
    pub count: i64,
    /// Ordering column (default: id)
    #[param(value_type = Option<SortKey>)]
    pub sort: Option<String>,
}

impl BookListQuery {
    pub fn sort_key(&self) -> Result<SortKey, AppError> {
        self.sort.as_deref().map_or(Ok(SortKey::default()), SortKey::from_str)
    }
}

impl Default for BookListQuery {
    fn default() -> Self {
        Self {
            count: DEFAULT_LIST_COUNT,
            sort: None,
        }
    }
}

/// Batch deletion query parameters (`?book_ids=1&book_ids=2`)
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BatchDeleteQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "book_ids must contain at least one id"))]
    pub book_ids: Vec<i64>,
}
