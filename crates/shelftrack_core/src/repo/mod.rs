//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Book::validate()` / `Author::validate()`
//!   before persistence.
//! - Repository APIs return semantic errors (`BookNotFound`, `DuplicateId`)
//!   in addition to DB transport errors.

pub mod book_repo;
