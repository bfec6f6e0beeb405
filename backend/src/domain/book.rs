//! Book data model.
//!
//! A [`BookDraft`] carries the validated business fields a client supplies.
//! Persistence turns a draft into a [`Book`] through [`Book::from_draft`],
//! so a `Book` value always has its identity and resolved section.

use serde::{Deserialize, Serialize};

use super::{BookId, Section, SectionId};

/// Earliest accepted publication year.
pub const PUBLICATION_YEAR_MIN: i32 = 1;
/// Latest accepted publication year.
pub const PUBLICATION_YEAR_MAX: i32 = 9999;

/// Validation errors for book fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookValidationError {
    /// Title was blank once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
    /// ISBN was blank once trimmed.
    #[error("isbn must not be empty")]
    EmptyIsbn,
    /// ISBN contained characters other than digits, hyphens and a final `X`.
    #[error("isbn may only contain digits, hyphens and a trailing X")]
    InvalidIsbn,
    /// Publication year outside the accepted range.
    #[error("publication year must be between {min} and {max}, got {value}")]
    PublicationYearOutOfRange {
        /// Lower bound.
        min: i32,
        /// Upper bound.
        max: i32,
        /// Rejected value.
        value: i32,
    },
    /// The resolved section does not match the one the draft references.
    #[error("draft references section {expected} but section {actual} was supplied")]
    SectionMismatch {
        /// Section id carried by the draft.
        expected: SectionId,
        /// Section id of the resolved section.
        actual: SectionId,
    },
}

fn validate_isbn(raw: &str) -> Result<String, BookValidationError> {
    let isbn = raw.trim();
    if isbn.is_empty() {
        return Err(BookValidationError::EmptyIsbn);
    }
    let body = isbn
        .strip_suffix('X')
        .or_else(|| isbn.strip_suffix('x'))
        .unwrap_or(isbn);
    let well_formed = body.chars().any(|c| c.is_ascii_digit())
        && body.chars().all(|c| c.is_ascii_digit() || c == '-');
    if !well_formed {
        return Err(BookValidationError::InvalidIsbn);
    }
    Ok(isbn.to_ascii_uppercase())
}

/// Business fields of a book before persistence assigns its identity.
///
/// ## Invariants
/// - `title` is trimmed and non-empty.
/// - `isbn` is trimmed, non-empty and only holds digits, hyphens and an
///   optional trailing `X` (normalised to upper case).
/// - `publication_year` lies in
///   [`PUBLICATION_YEAR_MIN`]..=[`PUBLICATION_YEAR_MAX`].
///
/// # Examples
/// ```
/// use bookstore::domain::{BookDraft, SectionId};
///
/// let draft = BookDraft::try_new("testBook", "987654323", 1998, SectionId::new(24).unwrap())
///     .expect("valid draft");
/// assert_eq!(draft.title(), "testBook");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    title: String,
    isbn: String,
    publication_year: i32,
    section_id: SectionId,
}

impl BookDraft {
    /// Validate raw field values.
    pub fn try_new(
        title: &str,
        isbn: &str,
        publication_year: i32,
        section_id: SectionId,
    ) -> Result<Self, BookValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        let isbn = validate_isbn(isbn)?;
        if !(PUBLICATION_YEAR_MIN..=PUBLICATION_YEAR_MAX).contains(&publication_year) {
            return Err(BookValidationError::PublicationYearOutOfRange {
                min: PUBLICATION_YEAR_MIN,
                max: PUBLICATION_YEAR_MAX,
                value: publication_year,
            });
        }
        Ok(Self {
            title: title.to_owned(),
            isbn,
            publication_year,
            section_id,
        })
    }

    /// Book title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Normalised ISBN.
    #[must_use]
    pub fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    /// Year of publication.
    #[must_use]
    pub fn publication_year(&self) -> i32 {
        self.publication_year
    }

    /// Section the book should be shelved in.
    #[must_use]
    pub fn section_id(&self) -> SectionId {
        self.section_id
    }
}

/// A persisted book.
///
/// Serialised as
/// `{"bookid":1,"title":"Book","isbn":"123","publicationYear":2020,"section":{...}}`.
///
/// # Examples
/// ```
/// use bookstore::domain::{Book, BookId, Section, SectionId};
///
/// let section = Section::new(SectionId::new(1).unwrap(), "Fiction").unwrap();
/// let book = Book::new(BookId::new(1).unwrap(), "Book", "123234531545", 1, section).unwrap();
/// assert_eq!(book.section().name(), "Fiction");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookDto", into = "BookDto")]
pub struct Book {
    id: BookId,
    title: String,
    isbn: String,
    publication_year: i32,
    section: Section,
}

impl Book {
    /// Validate raw fields and build a book with its identity set.
    pub fn new(
        id: BookId,
        title: &str,
        isbn: &str,
        publication_year: i32,
        section: Section,
    ) -> Result<Self, BookValidationError> {
        let draft = BookDraft::try_new(title, isbn, publication_year, section.id())?;
        Self::from_draft(id, draft, section)
    }

    /// Combine a validated draft with the identity and section persistence
    /// resolved for it.
    pub fn from_draft(
        id: BookId,
        draft: BookDraft,
        section: Section,
    ) -> Result<Self, BookValidationError> {
        if draft.section_id != section.id() {
            return Err(BookValidationError::SectionMismatch {
                expected: draft.section_id,
                actual: section.id(),
            });
        }
        let BookDraft {
            title,
            isbn,
            publication_year,
            section_id: _,
        } = draft;
        Ok(Self {
            id,
            title,
            isbn,
            publication_year,
            section,
        })
    }

    /// Persisted identity.
    #[must_use]
    pub fn id(&self) -> BookId {
        self.id
    }

    /// Book title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Normalised ISBN.
    #[must_use]
    pub fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    /// Year of publication.
    #[must_use]
    pub fn publication_year(&self) -> i32 {
        self.publication_year
    }

    /// Section the book is shelved in.
    #[must_use]
    pub fn section(&self) -> &Section {
        &self.section
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookDto {
    #[serde(rename = "bookid")]
    id: BookId,
    title: String,
    isbn: String,
    publication_year: i32,
    section: Section,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        Self {
            id: value.id,
            title: value.title,
            isbn: value.isbn,
            publication_year: value.publication_year,
            section: value.section,
        }
    }
}

impl TryFrom<BookDto> for Book {
    type Error = BookValidationError;

    fn try_from(value: BookDto) -> Result<Self, Self::Error> {
        Self::new(
            value.id,
            &value.title,
            &value.isbn,
            value.publication_year,
            value.section,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn fiction() -> Section {
        Section::new(SectionId::new(1).expect("id"), "Fiction").expect("section")
    }

    #[rstest]
    #[case("  ", "123", 2000, BookValidationError::EmptyTitle)]
    #[case("Title", " ", 2000, BookValidationError::EmptyIsbn)]
    #[case("Title", "12a4", 2000, BookValidationError::InvalidIsbn)]
    #[case("Title", "---", 2000, BookValidationError::InvalidIsbn)]
    #[case(
        "Title",
        "123",
        0,
        BookValidationError::PublicationYearOutOfRange { min: 1, max: 9999, value: 0 }
    )]
    #[case(
        "Title",
        "123",
        10_000,
        BookValidationError::PublicationYearOutOfRange { min: 1, max: 9999, value: 10_000 }
    )]
    fn draft_rejects_invalid_fields(
        #[case] title: &str,
        #[case] isbn: &str,
        #[case] year: i32,
        #[case] expected: BookValidationError,
    ) {
        let section_id = SectionId::new(1).expect("id");
        let err = BookDraft::try_new(title, isbn, year, section_id).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(" 0-306-40615-2 ", "0-306-40615-2")]
    #[case("080442957x", "080442957X")]
    #[case("123234531545", "123234531545")]
    fn draft_normalises_isbn(#[case] raw: &str, #[case] expected: &str) {
        let draft =
            BookDraft::try_new("Title", raw, 2001, SectionId::new(1).expect("id")).expect("draft");
        assert_eq!(draft.isbn(), expected);
    }

    #[rstest]
    fn from_draft_rejects_mismatched_section(fiction: Section) {
        let draft = BookDraft::try_new("Title", "123", 2001, SectionId::new(9).expect("id"))
            .expect("draft");
        let err = Book::from_draft(BookId::new(1).expect("id"), draft, fiction)
            .expect_err("mismatch");
        assert!(matches!(err, BookValidationError::SectionMismatch { .. }));
    }

    #[rstest]
    fn serialises_with_wire_field_names(fiction: Section) {
        let book = Book::new(BookId::new(1).expect("id"), "Book", "123234531545", 1, fiction)
            .expect("book");
        let json = serde_json::to_string(&book).expect("serialise");
        assert_eq!(
            json,
            r#"{"bookid":1,"title":"Book","isbn":"123234531545","publicationYear":1,"section":{"sectionid":1,"name":"Fiction"}}"#
        );
    }
}
