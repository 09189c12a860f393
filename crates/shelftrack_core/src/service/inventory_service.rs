//! Inventory use-case service.
//!
//! # Responsibility
//! - Normalize operator input (author capitalisation) before persistence.
//! - Apply add/update validation ordering expected by the console flow.
//! - Translate repository errors into use-case errors.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Logged events carry IDs and counts only, never titles or names.

use crate::model::book::{Author, AuthorId, Book, BookDetails, BookId};
use crate::model::validation::{check_quantity, is_blank, title_case, ValidationError};
use crate::repo::book_repo::{BookRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for inventory use-cases.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    BookNotFound(BookId),
    DuplicateId,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::BookNotFound(_) => write!(f, "Book ID not found."),
            Self::DuplicateId => write!(f, "Book or author ID already exists."),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::BookNotFound(_) | Self::DuplicateId => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::BookNotFound(id) => Self::BookNotFound(id),
            RepoError::DuplicateId => Self::DuplicateId,
            other => Self::Repo(other),
        }
    }
}

impl ServiceError {
    /// Returns `true` for storage failures, as opposed to input problems.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Repo(_))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Request model for adding a book together with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookRequest {
    pub book_id: BookId,
    pub title: String,
    pub author_id: AuthorId,
    /// Capitalised by the service before storage.
    pub author_name: String,
    /// Capitalised by the service before storage.
    pub author_country: String,
    pub quantity: i64,
}

/// Result of a successful add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedBook {
    pub book: Book,
    pub author: Author,
    /// `false` when an existing author row was reused.
    pub author_created: bool,
}

/// Single-field book change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookUpdate {
    Quantity(i64),
    Title(String),
    AuthorName(String),
    AuthorCountry(String),
}

impl BookUpdate {
    fn field(&self) -> &'static str {
        match self {
            Self::Quantity(_) => "quantity",
            Self::Title(_) => "title",
            Self::AuthorName(_) => "author_name",
            Self::AuthorCountry(_) => "author_country",
        }
    }
}

/// Search criteria accepted by [`InventoryService::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    ById(BookId),
    /// Case-insensitive partial title match.
    TitleContains(String),
}

/// Inventory service facade over repository implementations.
pub struct InventoryService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> InventoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a book, creating its author when the author ID is new.
    ///
    /// # Contract
    /// - Author name and country are title-cased.
    /// - Blank title/name/country is reported before a negative quantity.
    /// - An existing author ID is reused as stored; the supplied name and
    ///   country are ignored in that case.
    pub fn add_book(&self, request: NewBookRequest) -> ServiceResult<AddedBook> {
        let author_name = title_case(&request.author_name);
        let author_country = title_case(&request.author_country);

        if is_blank(&request.title) || is_blank(&author_name) || is_blank(&author_country) {
            return Err(ValidationError::MissingBookFields.into());
        }
        check_quantity(request.quantity)?;

        let book = Book::new(
            request.book_id,
            request.title,
            request.author_id,
            request.quantity,
        );
        let author = Author::new(request.author_id, author_name, author_country);

        let outcome = self.repo.add_book(&book, &author).map_err(|err| {
            warn!(
                "event=book_add module=service status=error book_id={} author_id={} error={}",
                book.id, author.id, err
            );
            ServiceError::from(err)
        })?;

        info!(
            "event=book_add module=service status=ok book_id={} author_id={} author_created={}",
            book.id, author.id, outcome.author_created
        );
        Ok(AddedBook {
            book,
            author,
            author_created: outcome.author_created,
        })
    }

    /// Gets one book with author details.
    pub fn book_details(&self, id: BookId) -> ServiceResult<BookDetails> {
        self.repo
            .get_book_details(id)?
            .ok_or(ServiceError::BookNotFound(id))
    }

    /// Applies one field change and returns the normalized value stored.
    pub fn update_book(&self, id: BookId, update: BookUpdate) -> ServiceResult<BookUpdate> {
        let applied = match update {
            BookUpdate::Quantity(quantity) => {
                check_quantity(quantity)?;
                self.repo.update_quantity(id, quantity)?;
                BookUpdate::Quantity(quantity)
            }
            BookUpdate::Title(title) => {
                if is_blank(&title) {
                    return Err(ValidationError::EmptyTitle.into());
                }
                self.repo.update_title(id, &title)?;
                BookUpdate::Title(title)
            }
            BookUpdate::AuthorName(name) => {
                let name = title_case(&name);
                if is_blank(&name) {
                    return Err(ValidationError::EmptyAuthorName.into());
                }
                self.repo.update_author_name(id, &name)?;
                BookUpdate::AuthorName(name)
            }
            BookUpdate::AuthorCountry(country) => {
                let country = title_case(&country);
                if is_blank(&country) {
                    return Err(ValidationError::EmptyCountry.into());
                }
                self.repo.update_author_country(id, &country)?;
                BookUpdate::AuthorCountry(country)
            }
        };

        info!(
            "event=book_update module=service status=ok book_id={} field={}",
            id,
            applied.field()
        );
        Ok(applied)
    }

    /// Deletes a book and returns its title.
    pub fn delete_book(&self, id: BookId) -> ServiceResult<String> {
        let title = self.repo.delete_book(id)?;
        info!("event=book_delete module=service status=ok book_id={id}");
        Ok(title)
    }

    /// Runs an ID or partial-title search.
    pub fn search(&self, criteria: &SearchCriteria) -> ServiceResult<Vec<BookDetails>> {
        let (mode, hits) = match criteria {
            SearchCriteria::ById(id) => ("id", self.repo.find_by_id(*id)?),
            SearchCriteria::TitleContains(fragment) => ("title", self.repo.find_by_title(fragment)?),
        };
        info!(
            "event=book_search module=service status=ok mode={} hits={}",
            mode,
            hits.len()
        );
        Ok(hits)
    }

    /// Lists every book with author details, ordered by title.
    pub fn list_all(&self) -> ServiceResult<Vec<BookDetails>> {
        Ok(self.repo.list_all()?)
    }

    /// Number of book rows currently stored.
    pub fn book_count(&self) -> ServiceResult<u64> {
        Ok(self.repo.count_books()?)
    }
}
