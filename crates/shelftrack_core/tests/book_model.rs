use shelftrack_core::{Author, Book, BookDetails, IdKind, ValidationError};

#[test]
fn book_validate_checks_ids_title_and_quantity() {
    assert_eq!(Book::new(3001, "Title", 1290, 0).validate(), Ok(()));
    assert_eq!(
        Book::new(301, "Title", 1290, 1).validate(),
        Err(ValidationError::InvalidId(IdKind::Book))
    );
    assert_eq!(
        Book::new(3001, "Title", 12900, 1).validate(),
        Err(ValidationError::InvalidId(IdKind::Author))
    );
    assert_eq!(
        Book::new(3001, "   ", 1290, 1).validate(),
        Err(ValidationError::EmptyTitle)
    );
    assert_eq!(
        Book::new(3001, "Title", 1290, -5).validate(),
        Err(ValidationError::NegativeQuantity)
    );
}

#[test]
fn author_validate_requires_name_and_country() {
    assert_eq!(Author::new(1290, "Charles Dickens", "England").validate(), Ok(()));
    assert_eq!(
        Author::new(1290, "", "England").validate(),
        Err(ValidationError::EmptyAuthorName)
    );
    assert_eq!(
        Author::new(1290, "Charles Dickens", " ").validate(),
        Err(ValidationError::EmptyCountry)
    );
}

#[test]
fn book_serialization_uses_column_names() {
    let book = Book::new(3002, "Harry Potter And The Philosopher's Stone", 8937, 40);

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], 3002);
    assert_eq!(json["authorID"], 8937);
    assert_eq!(json["quantity"], 40);

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn book_details_serializes_author_fields() {
    let details = BookDetails {
        id: 3001,
        title: "A Tale Of Two Cities".to_string(),
        author_name: "Charles Dickens".to_string(),
        author_country: "England".to_string(),
        quantity: 30,
    };

    let json = serde_json::to_value(&details).unwrap();
    assert_eq!(json["author_name"], "Charles Dickens");
    assert_eq!(json["author_country"], "England");
}
