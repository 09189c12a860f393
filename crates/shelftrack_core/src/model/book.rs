//! Book and author records.
//!
//! # Responsibility
//! - Define the stored shape of `book` and `author` rows.
//! - Define the joined read model shown by search and listing use-cases.
//!
//! # Invariants
//! - `Book::validate()` / `Author::validate()` must pass before persistence.
//! - A book references its author by `author_id`; the author row owns the
//!   name and country shown for every book by that author.

use crate::model::validation::{check_id, check_quantity, is_blank, IdKind, ValidationError};
use serde::{Deserialize, Serialize};

pub type BookId = i64;
pub type AuthorId = i64;

/// Stored `author` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub country: String,
}

impl Author {
    pub fn new(id: AuthorId, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            country: country.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.id, IdKind::Author)?;
        if is_blank(&self.name) {
            return Err(ValidationError::EmptyAuthorName);
        }
        if is_blank(&self.country) {
            return Err(ValidationError::EmptyCountry);
        }
        Ok(())
    }
}

/// Stored `book` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// Serialized as `authorID` to match the column name.
    #[serde(rename = "authorID")]
    pub author_id: AuthorId,
    /// Copies currently in stock.
    pub quantity: i64,
}

impl Book {
    pub fn new(id: BookId, title: impl Into<String>, author_id: AuthorId, quantity: i64) -> Self {
        Self {
            id,
            title: title.into(),
            author_id,
            quantity,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.id, IdKind::Book)?;
        check_id(self.author_id, IdKind::Author)?;
        if is_blank(&self.title) {
            return Err(ValidationError::EmptyTitle);
        }
        check_quantity(self.quantity)?;
        Ok(())
    }
}

/// Book joined with its author, as displayed to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetails {
    pub id: BookId,
    pub title: String,
    pub author_name: String,
    pub author_country: String,
    pub quantity: i64,
}
