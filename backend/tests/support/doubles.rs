//! Recording doubles for the driving ports exercised over HTTP.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bookstore::domain::ports::{BookService, LoginService};
use bookstore::domain::{Book, BookDraft, BookId, Error, LoginCredentials, Principal};

use super::recording_double_macro::recording_double;

recording_double! {
    /// Configurable success or failure outcome for RecordingLoginService.
    pub(crate) enum LoginResponse {
        Ok(Principal),
        Err(Error),
    }

    /// Login port double recording the usernames it was asked about.
    pub(crate) struct RecordingLoginService {
        calls: String,
        trait: LoginService,
        method: authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>,
        record: credentials.username().to_owned(),
        calls_lock: "login calls lock",
        response_lock: "login response lock",
    }
}

/// One call received by [`RecordingBookService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BookCall {
    FindAll,
    FindById(i64),
    Save(BookDraft),
    Update(BookDraft, i64),
    Delete(i64),
}

/// Canned outcomes for each book operation.
#[derive(Clone)]
pub(crate) struct BookResponses {
    pub(crate) find_all: Result<Vec<Book>, Error>,
    pub(crate) find_by_id: Result<Option<Book>, Error>,
    pub(crate) save: Result<Book, Error>,
    pub(crate) update: Result<Book, Error>,
    pub(crate) delete: Result<(), Error>,
}

impl BookResponses {
    /// Every operation succeeds around `book`.
    pub(crate) fn around(book: &Book) -> Self {
        Self {
            find_all: Ok(vec![book.clone()]),
            find_by_id: Ok(Some(book.clone())),
            save: Ok(book.clone()),
            update: Ok(book.clone()),
            delete: Ok(()),
        }
    }
}

/// Book port double recording calls and replaying [`BookResponses`].
#[derive(Clone)]
pub(crate) struct RecordingBookService {
    calls: Arc<Mutex<Vec<BookCall>>>,
    responses: Arc<Mutex<BookResponses>>,
}

impl RecordingBookService {
    pub(crate) fn new(responses: BookResponses) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(responses)),
        }
    }

    pub(crate) fn calls(&self) -> Vec<BookCall> {
        self.calls.lock().expect("book calls lock").clone()
    }

    pub(crate) fn update_responses(&self, update: impl FnOnce(&mut BookResponses)) {
        update(&mut self.responses.lock().expect("book responses lock"));
    }

    fn record<T>(&self, call: BookCall, pick: impl FnOnce(&BookResponses) -> T) -> T {
        self.calls.lock().expect("book calls lock").push(call);
        pick(&self.responses.lock().expect("book responses lock"))
    }
}

#[async_trait]
impl BookService for RecordingBookService {
    async fn find_all(&self) -> Result<Vec<Book>, Error> {
        self.record(BookCall::FindAll, |r| r.find_all.clone())
    }

    async fn find_book_by_id(&self, id: BookId) -> Result<Option<Book>, Error> {
        self.record(BookCall::FindById(id.get()), |r| r.find_by_id.clone())
    }

    async fn save(&self, draft: BookDraft) -> Result<Book, Error> {
        self.record(BookCall::Save(draft), |r| r.save.clone())
    }

    async fn update(&self, draft: BookDraft, id: BookId) -> Result<Book, Error> {
        self.record(BookCall::Update(draft, id.get()), |r| r.update.clone())
    }

    async fn delete(&self, id: BookId) -> Result<(), Error> {
        self.record(BookCall::Delete(id.get()), |r| r.delete.clone())
    }
}
