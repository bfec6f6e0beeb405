//! In-memory `BookRepository`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::error;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, BookDraft, BookId, Section};

#[derive(Debug, Default)]
struct Store {
    books: BTreeMap<BookId, Book>,
    last_id: i64,
}

impl Store {
    fn next_id(&mut self) -> Result<BookId, BookRepositoryError> {
        let raw = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| BookRepositoryError::query("book id space exhausted"))?;
        let id = BookId::new(raw).map_err(|err| BookRepositoryError::query(err.to_string()))?;
        self.last_id = raw;
        Ok(id)
    }
}

fn assemble(id: BookId, draft: BookDraft, section: Section) -> Result<Book, BookRepositoryError> {
    Book::from_draft(id, draft, section).map_err(|err| {
        error!(book_id = %id, error = %err, "refusing to store inconsistent book");
        BookRepositoryError::query(err.to_string())
    })
}

/// Books keyed by id behind an async lock.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    store: RwLock<Store>,
}

impl InMemoryBookRepository {
    /// An empty catalogue; the first insert receives id 1.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(self.store.read().await.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookRepositoryError> {
        Ok(self.store.read().await.books.get(&id).cloned())
    }

    async fn insert(
        &self,
        draft: BookDraft,
        section: Section,
    ) -> Result<Book, BookRepositoryError> {
        let mut store = self.store.write().await;
        let id = store.next_id()?;
        let book = assemble(id, draft, section)?;
        store.books.insert(id, book.clone());
        Ok(book)
    }

    async fn replace(
        &self,
        id: BookId,
        draft: BookDraft,
        section: Section,
    ) -> Result<Option<Book>, BookRepositoryError> {
        let mut store = self.store.write().await;
        let Some(slot) = store.books.get_mut(&id) else {
            return Ok(None);
        };
        let book = assemble(id, draft, section)?;
        *slot = book.clone();
        Ok(Some(book))
    }

    async fn remove(&self, id: BookId) -> Result<bool, BookRepositoryError> {
        Ok(self.store.write().await.books.remove(&id).is_some())
    }
}
