//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and lookup APIs over the `book` and `author` tables.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Multi-statement writes run in a single immediate transaction.
//! - Read paths tolerate NULL columns left by older tools: text reads as
//!   empty and quantity as zero, with a `book_read` warning, so such rows
//!   stay visible and can be repaired or deleted.
//! - Joined reads only return books whose author row exists.

use crate::db::DbError;
use crate::model::book::{Author, AuthorId, Book, BookDetails, BookId};
use crate::model::validation::{check_quantity, is_blank, ValidationError};
use log::warn;
use rusqlite::{
    ffi, params, Connection, ErrorCode, OptionalExtension, Row, Transaction, TransactionBehavior,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DETAILS_SELECT_SQL: &str = "SELECT
    b.id AS id,
    b.title AS title,
    a.Name AS author_name,
    a.Country AS author_country,
    b.quantity AS quantity
FROM book b
INNER JOIN author a ON b.authorID = a.ID";

const LIKE_ESCAPE: char = '\\';

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book/author persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    BookNotFound(BookId),
    /// Insert collided with an existing primary key.
    DuplicateId,
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::BookNotFound(id) => write!(f, "book not found: {id}"),
            Self::DuplicateId => write!(f, "book or author ID already exists"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::BookNotFound(_) | Self::DuplicateId | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result of a successful [`BookRepository::add_book`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddBookOutcome {
    /// `false` when an author with the same ID already existed and was reused.
    pub author_created: bool,
}

/// Repository interface for inventory operations.
pub trait BookRepository {
    /// Inserts the author when missing, then the book, atomically.
    fn add_book(&self, book: &Book, author: &Author) -> RepoResult<AddBookOutcome>;
    fn get_book_details(&self, id: BookId) -> RepoResult<Option<BookDetails>>;
    fn update_quantity(&self, id: BookId, quantity: i64) -> RepoResult<()>;
    fn update_title(&self, id: BookId, title: &str) -> RepoResult<()>;
    /// Renames the author referenced by the given book.
    fn update_author_name(&self, id: BookId, name: &str) -> RepoResult<()>;
    /// Changes the country of the author referenced by the given book.
    fn update_author_country(&self, id: BookId, country: &str) -> RepoResult<()>;
    /// Deletes one book and returns its title. The author row is kept.
    fn delete_book(&self, id: BookId) -> RepoResult<String>;
    fn find_by_id(&self, id: BookId) -> RepoResult<Vec<BookDetails>>;
    /// Case-insensitive substring match on title, ordered by book ID.
    fn find_by_title(&self, fragment: &str) -> RepoResult<Vec<BookDetails>>;
    /// All books with author details, ordered by title.
    fn list_all(&self) -> RepoResult<Vec<BookDetails>>;
    fn count_books(&self) -> RepoResult<u64>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn add_book(&self, book: &Book, author: &Author) -> RepoResult<AddBookOutcome> {
        book.validate()?;
        author.validate()?;
        if book.author_id != author.id {
            return Err(RepoError::InvalidData(format!(
                "book {} references author {} but author {} was supplied",
                book.id, book.author_id, author.id
            )));
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let author_created = if author_exists(&tx, author.id)? {
            false
        } else {
            insert_author(&tx, author)?;
            true
        };
        insert_book(&tx, book)?;
        tx.commit()?;

        Ok(AddBookOutcome { author_created })
    }

    fn get_book_details(&self, id: BookId) -> RepoResult<Option<BookDetails>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DETAILS_SELECT_SQL} WHERE b.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_details_row(row)?));
        }

        Ok(None)
    }

    fn update_quantity(&self, id: BookId, quantity: i64) -> RepoResult<()> {
        check_quantity(quantity)?;
        let changed = self.conn.execute(
            "UPDATE book SET quantity = ?1 WHERE id = ?2;",
            params![quantity, id],
        )?;
        ensure_changed(changed, id)
    }

    fn update_title(&self, id: BookId, title: &str) -> RepoResult<()> {
        if is_blank(title) {
            return Err(ValidationError::EmptyTitle.into());
        }
        let changed = self.conn.execute(
            "UPDATE book SET title = ?1 WHERE id = ?2;",
            params![title, id],
        )?;
        ensure_changed(changed, id)
    }

    fn update_author_name(&self, id: BookId, name: &str) -> RepoResult<()> {
        if is_blank(name) {
            return Err(ValidationError::EmptyAuthorName.into());
        }
        let changed = self.conn.execute(
            "UPDATE author SET Name = ?1
             WHERE ID = (SELECT authorID FROM book WHERE id = ?2);",
            params![name, id],
        )?;
        ensure_changed(changed, id)
    }

    fn update_author_country(&self, id: BookId, country: &str) -> RepoResult<()> {
        if is_blank(country) {
            return Err(ValidationError::EmptyCountry.into());
        }
        let changed = self.conn.execute(
            "UPDATE author SET Country = ?1
             WHERE ID = (SELECT authorID FROM book WHERE id = ?2);",
            params![country, id],
        )?;
        ensure_changed(changed, id)
    }

    fn delete_book(&self, id: BookId) -> RepoResult<String> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let title = tx
            .query_row(
                "SELECT COALESCE(title, '') FROM book WHERE id = ?1;",
                [id],
                |row| row.get::<_, String>(0),
            )
            .optional()?
            .ok_or(RepoError::BookNotFound(id))?;

        tx.execute("DELETE FROM book WHERE id = ?1;", [id])?;
        tx.commit()?;

        Ok(title)
    }

    fn find_by_id(&self, id: BookId) -> RepoResult<Vec<BookDetails>> {
        Ok(self.get_book_details(id)?.into_iter().collect())
    }

    fn find_by_title(&self, fragment: &str) -> RepoResult<Vec<BookDetails>> {
        let pattern = format!("%{}%", escape_like(fragment));
        query_details(
            self.conn,
            &format!("{DETAILS_SELECT_SQL} WHERE b.title LIKE ?1 ESCAPE '\\' ORDER BY b.id;"),
            &pattern,
        )
    }

    fn list_all(&self) -> RepoResult<Vec<BookDetails>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DETAILS_SELECT_SQL} ORDER BY b.title, b.id;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_details_row(row)?);
        }

        Ok(books)
    }

    fn count_books(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM book;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative book count {count}")))
    }
}

pub(crate) fn author_exists(conn: &Connection, id: AuthorId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM author WHERE ID = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn book_exists(conn: &Connection, id: BookId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM book WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn insert_author(conn: &Connection, author: &Author) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO author (ID, Name, Country) VALUES (?1, ?2, ?3);",
        params![author.id, author.name.as_str(), author.country.as_str()],
    )
    .map_err(map_insert_error)?;
    Ok(())
}

pub(crate) fn insert_book(conn: &Connection, book: &Book) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO book (id, title, authorID, quantity) VALUES (?1, ?2, ?3, ?4);",
        params![book.id, book.title.as_str(), book.author_id, book.quantity],
    )
    .map_err(map_insert_error)?;
    Ok(())
}

fn query_details(conn: &Connection, sql: &str, param: &str) -> RepoResult<Vec<BookDetails>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([param])?;
    let mut books = Vec::new();
    while let Some(row) = rows.next()? {
        books.push(parse_details_row(row)?);
    }

    Ok(books)
}

fn parse_details_row(row: &Row<'_>) -> RepoResult<BookDetails> {
    let id: BookId = row.get("id")?;
    Ok(BookDetails {
        id,
        title: text_or_empty(row, "title", id)?,
        author_name: text_or_empty(row, "author_name", id)?,
        author_country: text_or_empty(row, "author_country", id)?,
        quantity: match row.get::<_, Option<i64>>("quantity")? {
            Some(quantity) => quantity,
            None => {
                warn_null_column(id, "quantity");
                0
            }
        },
    })
}

fn text_or_empty(row: &Row<'_>, column: &str, id: BookId) -> RepoResult<String> {
    match row.get::<_, Option<String>>(column)? {
        Some(value) => Ok(value),
        None => {
            warn_null_column(id, column);
            Ok(String::new())
        }
    }
}

fn warn_null_column(id: BookId, column: &str) {
    warn!("event=book_read module=repo status=degraded book_id={id} null_column={column}");
}

fn ensure_changed(changed: usize, id: BookId) -> RepoResult<()> {
    if changed == 0 {
        return Err(RepoError::BookNotFound(id));
    }
    Ok(())
}

fn map_insert_error(err: rusqlite::Error) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && matches!(
                    failure.extended_code,
                    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
                ) =>
        {
            RepoError::DuplicateId
        }
        _ => err.into(),
    }
}

/// Escapes `LIKE` wildcards so user text matches literally.
pub(crate) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_escapes_wildcards_and_escape_char() {
        assert_eq!(escape_like("50% off_sale"), "50\\% off\\_sale");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
