//! Interactive main menu and per-action prompt flows.
//!
//! # Responsibility
//! - Drive the numbered menu over any line-based input/output pair.
//! - Translate service results into operator-facing messages.
//!
//! # Invariants
//! - Input and validation failures never end the session; the menu is
//!   shown again.
//! - End of input ends the session as if `0` had been chosen.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use log::{error, info};
use rusqlite::Connection;
use shelftrack_core::{
    parse_quantity, parse_quantity_unchecked, seed_initial_data, validate_id, BookRepository,
    BookUpdate, IdKind, InventoryService, NewBookRequest, SearchCriteria, ServiceError,
    SqliteBookRepository, ValidationError,
};

use crate::render::{details_report, search_line};

const MAIN_MENU: &str = "=== Shelf Track: Bookstore Management ===
1. Enter book
2. Update book
3. Delete book
4. Search books
5. View details of all books
0. Exit";

/// Line-oriented operator console.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `label` without a newline and reads one line.
    ///
    /// Returns `None` at end of input. The trailing line break is removed;
    /// other whitespace is kept. Bytes that are not valid UTF-8 are
    /// replaced with U+FFFD rather than failing the session.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        while matches!(raw.last(), Some(b'\n' | b'\r')) {
            raw.pop();
        }
        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Startup sequence followed by the main menu loop.
///
/// Fails only when seeding or console I/O fails; per-action storage errors
/// are reported on the console.
pub fn run_session<R: BufRead, W: Write>(
    conn: &Connection,
    seed: bool,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.say("Tables created or exist.\n")?;

    if seed {
        let report = seed_initial_data(conn).context("failed to insert initial data")?;
        if report.is_noop() {
            console.say("Initial data exists.\n")?;
        } else {
            console.say(format!(
                "Inserted {} authors, {} books.\n",
                report.authors_inserted, report.books_inserted
            ))?;
        }
    }

    let service = InventoryService::new(SqliteBookRepository::new(conn));
    run_menu(&service, console)?;
    Ok(())
}

/// Shows the main menu until the operator exits or input ends.
pub fn run_menu<Repo, R, W>(
    service: &InventoryService<Repo>,
    console: &mut Console<R, W>,
) -> io::Result<()>
where
    Repo: BookRepository,
    R: BufRead,
    W: Write,
{
    loop {
        console.say(MAIN_MENU)?;
        let Some(choice) = console.prompt("Enter choice (0-5): ")? else {
            break;
        };

        match choice.trim() {
            "1" => {
                log_action("add");
                add_book(service, console)?;
            }
            "2" => {
                log_action("update");
                update_book(service, console)?;
            }
            "3" => {
                log_action("delete");
                delete_book(service, console)?;
            }
            "4" => {
                log_action("search");
                search_books(service, console)?;
            }
            "5" => {
                log_action("view_all");
                view_all_books(service, console)?;
            }
            "0" => break,
            _ => console.say("Invalid choice, try again.\n")?,
        }
    }

    console.say("Exiting Shelf Track. Goodbye!")
}

fn add_book<Repo: BookRepository, R: BufRead, W: Write>(
    service: &InventoryService<Repo>,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.say("\n--- Add New Book ---")?;

    let Some(book_id) = prompt_id(console, "Enter book ID: ", IdKind::Book)? else {
        return Ok(());
    };
    let Some(title) = console.prompt("Enter book title: ")? else {
        return Ok(());
    };
    let Some(author_id) = prompt_id(console, "Enter author ID: ", IdKind::Author)? else {
        return Ok(());
    };
    let Some(author_name) = console.prompt("Enter author name: ")? else {
        return Ok(());
    };
    let Some(author_country) = console.prompt("Enter author country: ")? else {
        return Ok(());
    };
    let Some(raw_quantity) = console.prompt("Enter quantity: ")? else {
        return Ok(());
    };
    let quantity = match parse_quantity_unchecked(&raw_quantity) {
        Ok(quantity) => quantity,
        Err(err) => return report_validation(console, &err),
    };

    let request = NewBookRequest {
        book_id,
        title,
        author_id,
        author_name,
        author_country,
        quantity,
    };
    match service.add_book(request) {
        Ok(added) => console.say(format!("Book '{}' added.\n", added.book.title)),
        Err(err) => report_error(console, &err),
    }
}

fn update_book<Repo: BookRepository, R: BufRead, W: Write>(
    service: &InventoryService<Repo>,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.say("\n--- Update Book ---")?;

    let Some(book_id) = prompt_id(console, "Enter book ID: ", IdKind::Book)? else {
        return Ok(());
    };
    let book = match service.book_details(book_id) {
        Ok(book) => book,
        Err(err) => return report_error(console, &err),
    };

    console.say(format!("\nBook: {}", book.title))?;
    console.say(format!(
        "Author: {}, Country: {}",
        book.author_name, book.author_country
    ))?;
    console.say("1. Update quantity")?;
    console.say("2. Update title")?;
    console.say("3. Update author name")?;
    console.say("4. Update author country")?;
    let Some(choice) = console.prompt("Select option 1-4: ")? else {
        return Ok(());
    };

    let update = match choice.trim() {
        "1" => {
            let Some(raw) = console.prompt("Enter new quantity: ")? else {
                return Ok(());
            };
            match parse_quantity(&raw) {
                Ok(quantity) => BookUpdate::Quantity(quantity),
                Err(err) => return report_validation(console, &err),
            }
        }
        "2" => {
            let Some(title) = console.prompt("Enter new title: ")? else {
                return Ok(());
            };
            BookUpdate::Title(title)
        }
        "3" => {
            let Some(name) = console.prompt("Enter new author name: ")? else {
                return Ok(());
            };
            BookUpdate::AuthorName(name)
        }
        "4" => {
            let Some(country) = console.prompt("Enter new country: ")? else {
                return Ok(());
            };
            BookUpdate::AuthorCountry(country)
        }
        _ => return console.say("Invalid choice, no updates."),
    };

    match service.update_book(book_id, update) {
        Ok(BookUpdate::Quantity(_)) => {
            console.say(format!("Quantity updated for '{}'.\n", book.title))
        }
        Ok(BookUpdate::Title(title)) => console.say(format!("Title updated to '{title}'.\n")),
        Ok(BookUpdate::AuthorName(name)) => {
            console.say(format!("Author name updated to '{name}'.\n"))
        }
        Ok(BookUpdate::AuthorCountry(country)) => {
            console.say(format!("Country updated to '{country}'.\n"))
        }
        Err(err) => report_error(console, &err),
    }
}

fn delete_book<Repo: BookRepository, R: BufRead, W: Write>(
    service: &InventoryService<Repo>,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.say("\n--- Delete Book ---")?;

    let Some(book_id) = prompt_id(console, "Enter book ID: ", IdKind::Book)? else {
        return Ok(());
    };
    match service.delete_book(book_id) {
        Ok(title) => console.say(format!("Book '{title}' deleted.\n")),
        Err(err) => report_error(console, &err),
    }
}

fn search_books<Repo: BookRepository, R: BufRead, W: Write>(
    service: &InventoryService<Repo>,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.say("\n--- Search Books ---")?;
    console.say("1. Search by ID")?;
    console.say("2. Search by title")?;
    let Some(choice) = console.prompt("Select option (1-2): ")? else {
        return Ok(());
    };

    let criteria = match choice.trim() {
        "1" => {
            let Some(book_id) = prompt_id(console, "Enter book ID: ", IdKind::Book)? else {
                return Ok(());
            };
            SearchCriteria::ById(book_id)
        }
        "2" => {
            let Some(fragment) = console.prompt("Enter title (partial): ")? else {
                return Ok(());
            };
            SearchCriteria::TitleContains(fragment)
        }
        _ => return console.say("Invalid choice."),
    };

    match service.search(&criteria) {
        Ok(books) if books.is_empty() => console.say("No books found.\n"),
        Ok(books) => {
            console.say("\nSearch results:")?;
            for book in &books {
                console.say(search_line(book))?;
            }
            Ok(())
        }
        Err(err) => report_error(console, &err),
    }
}

fn view_all_books<Repo: BookRepository, R: BufRead, W: Write>(
    service: &InventoryService<Repo>,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.say("\n--- View All Books ---")?;

    match service.list_all() {
        Ok(books) if books.is_empty() => console.say("No books found.\n"),
        Ok(books) => {
            let report = details_report(&books);
            console.say(report.trim_end_matches('\n'))
        }
        Err(err) => report_error(console, &err),
    }
}

fn log_action(action: &str) {
    info!("event=menu_action module=cli status=start action={action}");
}

/// Prompts for an identifier; an invalid value is reported and yields `None`.
fn prompt_id<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    label: &str,
    kind: IdKind,
) -> io::Result<Option<i64>> {
    let Some(raw) = console.prompt(label)? else {
        return Ok(None);
    };
    match validate_id(&raw, kind) {
        Ok(id) => Ok(Some(id)),
        Err(err) => {
            report_validation(console, &err)?;
            Ok(None)
        }
    }
}

fn report_validation<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    err: &ValidationError,
) -> io::Result<()> {
    console.say(format!("Error: {err}"))
}

fn report_error<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    err: &ServiceError,
) -> io::Result<()> {
    if err.is_storage() {
        error!("event=menu_action module=cli status=error error={err}");
        console.say(format!("DB error: {err}"))
    } else {
        console.say(format!("Error: {err}"))
    }
}
