//! Input validation and normalization rules.
//!
//! # Responsibility
//! - Parse raw console text into typed identifiers and quantities.
//! - Provide the capitalisation rule applied to author names and countries.
//!
//! # Invariants
//! - Parsing never panics; every rejection is a `ValidationError`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// Accepted range for book and author identifiers.
pub const ID_RANGE: RangeInclusive<i64> = 1000..=9999;

/// Which identifier a validation message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Book,
    Author,
}

impl IdKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Book => "Book ID",
            Self::Author => "Author ID",
        }
    }
}

/// Rejection reasons for user-supplied or persisted inventory data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Identifier is not an integer within [`ID_RANGE`].
    InvalidId(IdKind),
    /// Quantity text is not an integer.
    InvalidQuantity,
    NegativeQuantity,
    EmptyTitle,
    EmptyAuthorName,
    EmptyCountry,
    /// One or more of title, author name and country is blank on add.
    MissingBookFields,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(kind) => {
                write!(f, "Invalid {}: Must be a 4-digit integer.", kind.label())
            }
            Self::InvalidQuantity => write!(f, "Quantity must be a whole number."),
            Self::NegativeQuantity => write!(f, "Quantity cannot be negative."),
            Self::EmptyTitle => write!(f, "Title cannot be empty."),
            Self::EmptyAuthorName => write!(f, "Author name cannot be empty."),
            Self::EmptyCountry => write!(f, "Country cannot be empty."),
            Self::MissingBookFields => write!(f, "Title, author, country cannot be empty."),
        }
    }
}

impl Error for ValidationError {}

/// Parses a 4-digit identifier from console text.
///
/// Surrounding whitespace is ignored; an explicit sign is accepted the same
/// way integer parsing accepts it.
pub fn validate_id(raw: &str, kind: IdKind) -> Result<i64, ValidationError> {
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidId(kind))?;
    check_id(id, kind)
}

/// Checks an already-typed identifier against [`ID_RANGE`].
pub fn check_id(id: i64, kind: IdKind) -> Result<i64, ValidationError> {
    if ID_RANGE.contains(&id) {
        Ok(id)
    } else {
        Err(ValidationError::InvalidId(kind))
    }
}

/// Parses a stock quantity, rejecting non-integers and negative values.
pub fn parse_quantity(raw: &str) -> Result<i64, ValidationError> {
    check_quantity(parse_quantity_unchecked(raw)?)
}

/// Parses quantity text without the sign check, for flows that report
/// other field errors before a negative quantity.
pub fn parse_quantity_unchecked(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidQuantity)
}

pub fn check_quantity(quantity: i64) -> Result<i64, ValidationError> {
    if quantity < 0 {
        return Err(ValidationError::NegativeQuantity);
    }
    Ok(quantity)
}

/// Capitalises each word: a cased letter that follows a non-letter is
/// uppercased, every other cased letter is lowercased.
///
/// `"j.r.r. tolkien"` becomes `"J.R.R. Tolkien"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_cased = false;

    for ch in value.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if cased {
            if previous_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
        } else {
            out.push(ch);
        }
        previous_cased = cased;
    }

    out
}

/// Returns `true` when the value has no visible characters.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{
        parse_quantity, parse_quantity_unchecked, title_case, validate_id, IdKind,
        ValidationError,
    };

    #[test]
    fn validate_id_accepts_four_digit_values() {
        assert_eq!(validate_id("3001", IdKind::Book), Ok(3001));
        assert_eq!(validate_id(" 1000 ", IdKind::Book), Ok(1000));
        assert_eq!(validate_id("9999", IdKind::Author), Ok(9999));
        assert_eq!(validate_id("+1234", IdKind::Book), Ok(1234));
    }

    #[test]
    fn validate_id_rejects_out_of_range_and_garbage() {
        for raw in ["999", "10000", "-3001", "", "abc", "30.01"] {
            assert_eq!(
                validate_id(raw, IdKind::Author),
                Err(ValidationError::InvalidId(IdKind::Author)),
                "input `{raw}` should be rejected"
            );
        }
    }

    #[test]
    fn invalid_id_message_names_the_identifier() {
        let err = validate_id("12", IdKind::Book).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Book ID: Must be a 4-digit integer.");
    }

    #[test]
    fn parse_quantity_rules() {
        assert_eq!(parse_quantity(" 0 "), Ok(0));
        assert_eq!(parse_quantity("42"), Ok(42));
        assert_eq!(parse_quantity("-1"), Err(ValidationError::NegativeQuantity));
        assert_eq!(parse_quantity("lots"), Err(ValidationError::InvalidQuantity));
        assert_eq!(parse_quantity_unchecked("-1"), Ok(-1));
    }

    #[test]
    fn title_case_capitalises_words() {
        assert_eq!(title_case("charles dickens"), "Charles Dickens");
        assert_eq!(title_case("j.r.r. tolkien"), "J.R.R. Tolkien");
        assert_eq!(title_case("SOUTH AFRICA"), "South Africa");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("  "), "  ");
    }
}
