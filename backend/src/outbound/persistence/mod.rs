//! In-process persistence adapters.
//!
//! Books and sections live in memory behind async read-write locks; accounts
//! are a fixed table. State does not survive a restart.

mod memory_book_repository;
mod memory_login_service;
mod memory_section_repository;

pub use memory_book_repository::InMemoryBookRepository;
pub use memory_login_service::InMemoryLoginService;
pub use memory_section_repository::{InMemorySectionRepository, SectionSeedError};
