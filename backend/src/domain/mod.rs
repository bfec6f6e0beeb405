//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed catalogue entities used by the HTTP and
//! persistence adapters. Types are immutable once constructed; invariants
//! and serialisation contracts are documented on each type.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Book / BookDraft: catalogue entries before and after persistence.
//! - Section: the shelf grouping every book belongs to.
//! - Principal / Role: the authenticated caller and its grants.
//! - BookCatalogueService: the [`ports::BookService`] implementation.

pub mod auth;
pub mod book;
pub mod book_catalogue_service;
pub mod error;
pub mod ids;
pub mod ports;
pub mod section;
pub mod trace_id;

pub use self::auth::{
    LoginCredentials, LoginValidationError, Principal, Role, UnknownRoleError,
};
pub use self::book::{
    Book, BookDraft, BookValidationError, PUBLICATION_YEAR_MAX, PUBLICATION_YEAR_MIN,
};
pub use self::book_catalogue_service::BookCatalogueService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{BookId, EntityIdError, SectionId};
pub use self::section::{Section, SectionValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
