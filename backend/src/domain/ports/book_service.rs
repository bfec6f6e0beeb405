//! Driving port for the book catalogue use-cases.
//!
//! The HTTP controller depends only on this trait. Production wiring plugs in
//! [`crate::domain::BookCatalogueService`]; handler tests substitute a mock or
//! the [`FixtureBookService`] without touching persistence.

use async_trait::async_trait;

use crate::domain::{Book, BookDraft, BookId, Error, Section, SectionId};

/// Book catalogue capability consumed by inbound adapters.
///
/// # Examples
/// ```rust,no_run
/// # async fn example() -> Result<(), bookstore::domain::Error> {
/// use bookstore::domain::ports::{BookService, FixtureBookService};
///
/// let books = FixtureBookService.find_all().await?;
/// assert_eq!(books.len(), 2);
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookService: Send + Sync {
    /// Return every book.
    async fn find_all(&self) -> Result<Vec<Book>, Error>;

    /// Return the book with `id`, or `None` when no such book exists.
    async fn find_book_by_id(&self, id: BookId) -> Result<Option<Book>, Error>;

    /// Persist a new book and return it with its assigned id.
    ///
    /// Fails with `InvalidRequest` when the referenced section is unknown.
    async fn save(&self, draft: BookDraft) -> Result<Book, Error>;

    /// Replace every field of the book at `id`.
    ///
    /// Fails with `NotFound` when `id` is unknown and `InvalidRequest` when
    /// the referenced section is unknown.
    async fn update(&self, draft: BookDraft, id: BookId) -> Result<Book, Error>;

    /// Remove the book at `id`; fails with `NotFound` when `id` is unknown.
    async fn delete(&self, id: BookId) -> Result<(), Error>;
}

/// Fixture catalogue holding two fixed books.
///
/// Writes are not retained; they echo what a real store would return.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookService;

fn fixture_error(err: impl std::fmt::Display) -> Error {
    Error::internal(format!("invalid fixture book data: {err}"))
}

fn fixture_section(id: SectionId) -> Result<Option<Section>, Error> {
    let name = match id.get() {
        1 => "Fiction",
        2 => "Technology",
        _ => return Ok(None),
    };
    Section::new(id, name).map(Some).map_err(fixture_error)
}

fn fixture_books() -> Result<Vec<Book>, Error> {
    [
        (1, "Book", "123234531545", 1, 1),
        (2, "AnotherBook", "98765439876", 2020, 2),
    ]
    .into_iter()
    .map(|(id, title, isbn, year, section_id)| {
        let section_id = SectionId::new(section_id).map_err(fixture_error)?;
        let section = fixture_section(section_id)?
            .ok_or_else(|| Error::internal("fixture section missing"))?;
        let id = BookId::new(id).map_err(fixture_error)?;
        Book::new(id, title, isbn, year, section).map_err(fixture_error)
    })
    .collect()
}

fn resolve_section(draft: &BookDraft) -> Result<Section, Error> {
    fixture_section(draft.section_id())?.ok_or_else(|| {
        Error::invalid_request(format!("section {} does not exist", draft.section_id()))
    })
}

#[async_trait]
impl BookService for FixtureBookService {
    async fn find_all(&self) -> Result<Vec<Book>, Error> {
        fixture_books()
    }

    async fn find_book_by_id(&self, id: BookId) -> Result<Option<Book>, Error> {
        Ok(fixture_books()?.into_iter().find(|book| book.id() == id))
    }

    async fn save(&self, draft: BookDraft) -> Result<Book, Error> {
        let section = resolve_section(&draft)?;
        let id = BookId::new(3).map_err(fixture_error)?;
        Book::from_draft(id, draft, section).map_err(fixture_error)
    }

    async fn update(&self, draft: BookDraft, id: BookId) -> Result<Book, Error> {
        if self.find_book_by_id(id).await?.is_none() {
            return Err(Error::not_found(format!("book {id} not found")));
        }
        let section = resolve_section(&draft)?;
        Book::from_draft(id, draft, section).map_err(fixture_error)
    }

    async fn delete(&self, id: BookId) -> Result<(), Error> {
        match self.find_book_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("book {id} not found"))),
        }
    }
}
