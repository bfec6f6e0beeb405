//! Driven port for book persistence.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Book, BookDraft, BookId, Section};

define_port_error! {
    /// Errors raised by book persistence adapters.
    pub enum BookRepositoryError {
        /// Storage backend could not be reached or its lock is unusable.
        Connection => "book repository connection failed: {message}",
        /// A read or write statement failed.
        Query => "book repository query failed: {message}",
    }
}

/// Storage for books.
///
/// Implementations assign ids on insert and never reuse them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Every stored book ordered by id.
    async fn list(&self) -> Result<Vec<Book>, BookRepositoryError>;

    /// Look up one book.
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookRepositoryError>;

    /// Store a new book in `section` and return it with its new id.
    async fn insert(&self, draft: BookDraft, section: Section)
    -> Result<Book, BookRepositoryError>;

    /// Overwrite the book at `id`; `None` when no book has that id.
    async fn replace(
        &self,
        id: BookId,
        draft: BookDraft,
        section: Section,
    ) -> Result<Option<Book>, BookRepositoryError>;

    /// Remove the book at `id`; `false` when no book had that id.
    async fn remove(&self, id: BookId) -> Result<bool, BookRepositoryError>;
}
