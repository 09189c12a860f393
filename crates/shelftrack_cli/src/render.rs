//! Console formatting for book listings.

use shelftrack_core::BookDetails;

const HEADER_RULE_WIDTH: usize = 50;
const ENTRY_RULE_WIDTH: usize = 52;

/// One search hit per line.
pub(crate) fn search_line(book: &BookDetails) -> String {
    format!(
        "ID: {}, Title: {}, Author: {}, Country: {}, Qty: {}",
        book.id, book.title, book.author_name, book.author_country, book.quantity
    )
}

/// Full "view all" report, header included.
pub(crate) fn details_report(books: &[BookDetails]) -> String {
    let rule = "-".repeat(ENTRY_RULE_WIDTH);
    let mut report = format!("\nDetails {}\n", "-".repeat(HEADER_RULE_WIDTH));
    for book in books {
        report.push_str(&format!(
            "Title: {}\nAuthor's Name: {}\nAuthor's Country: {}\n{rule}\n",
            book.title, book.author_name, book.author_country
        ));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::{details_report, search_line};
    use shelftrack_core::BookDetails;

    fn sample() -> BookDetails {
        BookDetails {
            id: 3001,
            title: "A Tale Of Two Cities".to_string(),
            author_name: "Charles Dickens".to_string(),
            author_country: "England".to_string(),
            quantity: 30,
        }
    }

    #[test]
    fn search_line_lists_every_field() {
        assert_eq!(
            search_line(&sample()),
            "ID: 3001, Title: A Tale Of Two Cities, Author: Charles Dickens, Country: England, Qty: 30"
        );
    }

    #[test]
    fn details_report_has_header_and_separators() {
        let report = details_report(&[sample()]);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], format!("Details {}", "-".repeat(50)));
        assert_eq!(lines[2], "Title: A Tale Of Two Cities");
        assert_eq!(lines[3], "Author's Name: Charles Dickens");
        assert_eq!(lines[4], "Author's Country: England");
        assert_eq!(lines[5], "-".repeat(52));
    }
}
