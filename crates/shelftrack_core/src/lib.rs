//! Core inventory logic for ShelfTrack.
//! This crate is the single source of truth for book/author invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Author, AuthorId, Book, BookDetails, BookId};
pub use model::validation::{
    parse_quantity, parse_quantity_unchecked, title_case, validate_id, IdKind, ValidationError,
    ID_RANGE,
};
pub use repo::book_repo::{
    AddBookOutcome, BookRepository, RepoError, RepoResult, SqliteBookRepository,
};
pub use seed::{seed_initial_data, SeedReport};
pub use service::inventory_service::{
    AddedBook, BookUpdate, InventoryService, NewBookRequest, SearchCriteria, ServiceError,
    ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
