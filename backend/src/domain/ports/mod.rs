//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`BookService`], [`LoginService`]) are what inbound
//! adapters call. Driven ports ([`BookRepository`], [`SectionRepository`])
//! are what the domain calls; their errors are strongly typed so adapters
//! map failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod book_repository;
mod book_service;
mod login_service;
mod section_repository;

#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{BookRepository, BookRepositoryError};
#[cfg(test)]
pub use book_service::MockBookService;
pub use book_service::{BookService, FixtureBookService};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use section_repository::MockSectionRepository;
pub use section_repository::{SectionRepository, SectionRepositoryError};
