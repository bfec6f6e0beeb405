//! In-memory `SectionRepository` seeded at start-up.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{SectionRepository, SectionRepositoryError};
use crate::domain::{EntityIdError, Section, SectionId, SectionValidationError};

/// Errors raised while seeding sections.
#[derive(Debug, thiserror::Error)]
pub enum SectionSeedError {
    /// A seed name was blank.
    #[error(transparent)]
    Name(#[from] SectionValidationError),
    /// The seed list outgrew the id space.
    #[error(transparent)]
    Id(#[from] EntityIdError),
}

/// Sections keyed by id; ids follow seed order starting at 1.
#[derive(Debug, Default)]
pub struct InMemorySectionRepository {
    sections: RwLock<BTreeMap<SectionId, Section>>,
}

impl InMemorySectionRepository {
    /// Seed one section per name, numbering them from 1.
    ///
    /// # Examples
    /// ```
    /// use bookstore::outbound::persistence::InMemorySectionRepository;
    ///
    /// let repo = InMemorySectionRepository::seeded(["Fiction", "Travel"])
    ///     .expect("valid names");
    /// # let _ = repo;
    /// ```
    pub fn seeded<I, S>(names: I) -> Result<Self, SectionSeedError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sections = BTreeMap::new();
        for (raw_id, name) in (1_i64..).zip(names) {
            let id = SectionId::new(raw_id)?;
            sections.insert(id, Section::new(id, name)?);
        }
        Ok(Self {
            sections: RwLock::new(sections),
        })
    }
}

#[async_trait]
impl SectionRepository for InMemorySectionRepository {
    async fn find_by_id(&self, id: SectionId) -> Result<Option<Section>, SectionRepositoryError> {
        Ok(self.sections.read().await.get(&id).cloned())
    }
}
