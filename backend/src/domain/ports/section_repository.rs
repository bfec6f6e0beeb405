//! Driven port for section lookups.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Section, SectionId};

define_port_error! {
    /// Errors raised by section persistence adapters.
    pub enum SectionRepositoryError {
        /// Storage backend could not be reached or its lock is unusable.
        Connection => "section repository connection failed: {message}",
        /// A read statement failed.
        Query => "section repository query failed: {message}",
    }
}

/// Read access to sections referenced by books.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Look up one section.
    async fn find_by_id(&self, id: SectionId) -> Result<Option<Section>, SectionRepositoryError>;
}
