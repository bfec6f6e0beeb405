//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BookService, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub books: Arc<dyn BookService>,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use bookstore::domain::ports::{FixtureBookService, FixtureLoginService};
    /// use bookstore::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureLoginService), Arc::new(FixtureBookService));
    /// let _books = state.books.clone();
    /// ```
    pub fn new(login: Arc<dyn LoginService>, books: Arc<dyn BookService>) -> Self {
        Self { login, books }
    }
}
