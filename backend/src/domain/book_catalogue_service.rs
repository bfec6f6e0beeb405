//! Book catalogue domain service.
//!
//! Implements the [`BookService`] driving port over the book and section
//! repositories. Section references in incoming drafts are resolved here so
//! every returned [`Book`] carries its full section.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    BookRepository, BookRepositoryError, BookService, SectionRepository, SectionRepositoryError,
};
use crate::domain::{Book, BookDraft, BookId, Error, Section};

/// Book catalogue service backed by repository ports.
#[derive(Clone)]
pub struct BookCatalogueService<B, S> {
    book_repo: Arc<B>,
    section_repo: Arc<S>,
}

impl<B, S> BookCatalogueService<B, S> {
    /// Create a new service with the given repositories.
    pub fn new(book_repo: Arc<B>, section_repo: Arc<S>) -> Self {
        Self {
            book_repo,
            section_repo,
        }
    }
}

impl<B, S> BookCatalogueService<B, S>
where
    B: BookRepository,
    S: SectionRepository,
{
    fn map_book_error(error: BookRepositoryError) -> Error {
        match error {
            BookRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("book repository unavailable: {message}"))
            }
            BookRepositoryError::Query { message } => {
                Error::internal(format!("book repository error: {message}"))
            }
        }
    }

    fn map_section_error(error: SectionRepositoryError) -> Error {
        match error {
            SectionRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("section repository unavailable: {message}"))
            }
            SectionRepositoryError::Query { message } => {
                Error::internal(format!("section repository error: {message}"))
            }
        }
    }

    fn book_not_found(id: BookId) -> Error {
        Error::not_found(format!("book {id} not found")).with_details(json!({
            "bookid": id.get(),
            "code": "unknown_book",
        }))
    }

    async fn resolve_section(&self, draft: &BookDraft) -> Result<Section, Error> {
        let section_id = draft.section_id();
        self.section_repo
            .find_by_id(section_id)
            .await
            .map_err(Self::map_section_error)?
            .ok_or_else(|| {
                Error::invalid_request(format!("section {section_id} does not exist"))
                    .with_details(json!({
                        "field": "section",
                        "code": "unknown_section",
                        "sectionid": section_id.get(),
                    }))
            })
    }
}

#[async_trait]
impl<B, S> BookService for BookCatalogueService<B, S>
where
    B: BookRepository,
    S: SectionRepository,
{
    async fn find_all(&self) -> Result<Vec<Book>, Error> {
        self.book_repo.list().await.map_err(Self::map_book_error)
    }

    async fn find_book_by_id(&self, id: BookId) -> Result<Option<Book>, Error> {
        self.book_repo
            .find_by_id(id)
            .await
            .map_err(Self::map_book_error)
    }

    async fn save(&self, draft: BookDraft) -> Result<Book, Error> {
        let section = self.resolve_section(&draft).await?;
        let book = self
            .book_repo
            .insert(draft, section)
            .await
            .map_err(Self::map_book_error)?;
        info!(book_id = %book.id(), section_id = %book.section().id(), "book created");
        Ok(book)
    }

    async fn update(&self, draft: BookDraft, id: BookId) -> Result<Book, Error> {
        // An unknown book wins over an unknown section.
        let existing = self
            .book_repo
            .find_by_id(id)
            .await
            .map_err(Self::map_book_error)?;
        if existing.is_none() {
            warn!(book_id = %id, "update rejected for unknown book");
            return Err(Self::book_not_found(id));
        }
        let section = self.resolve_section(&draft).await?;
        match self
            .book_repo
            .replace(id, draft, section)
            .await
            .map_err(Self::map_book_error)?
        {
            Some(book) => {
                info!(book_id = %id, "book updated");
                Ok(book)
            }
            None => {
                warn!(book_id = %id, "update rejected for unknown book");
                Err(Self::book_not_found(id))
            }
        }
    }

    async fn delete(&self, id: BookId) -> Result<(), Error> {
        let removed = self
            .book_repo
            .remove(id)
            .await
            .map_err(Self::map_book_error)?;
        if !removed {
            warn!(book_id = %id, "delete rejected for unknown book");
            return Err(Self::book_not_found(id));
        }
        info!(book_id = %id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "book_catalogue_service_tests.rs"]
mod tests;
