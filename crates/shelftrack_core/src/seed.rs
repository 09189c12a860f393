//! Default catalogue inserted on startup.
//!
//! # Invariants
//! - Seeding only inserts rows whose IDs are absent; existing rows are never
//!   overwritten.
//! - Authors are inserted before books so foreign keys resolve.
//! - All inserts for one run commit together.

use crate::model::book::{Author, Book};
use crate::repo::book_repo::{author_exists, book_exists, insert_author, insert_book, RepoResult};
use log::info;
use rusqlite::{Connection, Transaction, TransactionBehavior};

const DEFAULT_AUTHORS: &[(i64, &str, &str)] = &[
    (1290, "Charles Dickens", "England"),
    (8937, "J.K. Rowling", "England"),
    (6380, "J.R.R. Tolkien", "South Africa"),
    (2356, "C.S. Lewis", "Ireland"),
    (5620, "Lewis Carrol", "England"),
];

const DEFAULT_BOOKS: &[(i64, &str, i64, i64)] = &[
    (3001, "A Tale Of Two Cities", 1290, 30),
    (3002, "Harry Potter And The Philosopher's Stone", 8937, 40),
    (3003, "The Lion, The Lord Of The Rings", 6380, 37),
    (3004, "Pride and Prejudice", 2356, 25),
    (3005, "Alice's Adventures In Wonderland", 5620, 12),
];

/// Counts of rows inserted by [`seed_initial_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub authors_inserted: usize,
    pub books_inserted: usize,
}

impl SeedReport {
    /// Returns `true` when every default row already existed.
    pub fn is_noop(&self) -> bool {
        self.authors_inserted == 0 && self.books_inserted == 0
    }
}

/// Default authors shipped with a fresh inventory.
pub fn default_authors() -> Vec<Author> {
    DEFAULT_AUTHORS
        .iter()
        .map(|&(id, name, country)| Author::new(id, name, country))
        .collect()
}

/// Default books shipped with a fresh inventory.
pub fn default_books() -> Vec<Book> {
    DEFAULT_BOOKS
        .iter()
        .map(|&(id, title, author_id, quantity)| Book::new(id, title, author_id, quantity))
        .collect()
}

/// Inserts missing default authors and books.
pub fn seed_initial_data(conn: &Connection) -> RepoResult<SeedReport> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let mut report = SeedReport::default();

    for author in default_authors() {
        if !author_exists(&tx, author.id)? {
            author.validate()?;
            insert_author(&tx, &author)?;
            report.authors_inserted += 1;
        }
    }

    for book in default_books() {
        if !book_exists(&tx, book.id)? {
            book.validate()?;
            insert_book(&tx, &book)?;
            report.books_inserted += 1;
        }
    }

    tx.commit()?;
    info!(
        "event=seed_apply module=seed status=ok authors_inserted={} books_inserted={}",
        report.authors_inserted, report.books_inserted
    );
    Ok(report)
}
