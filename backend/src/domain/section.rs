//! Section data model.

use serde::{Deserialize, Serialize};

use super::SectionId;

/// Validation errors returned by [`Section::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionValidationError {
    /// Name was blank once trimmed.
    #[error("section name must not be empty")]
    EmptyName,
}

/// A shelf grouping that books belong to.
///
/// Sections are owned independently of books; a book only references one.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
///
/// Serialised as `{"sectionid": 1, "name": "Fiction"}`.
///
/// # Examples
/// ```
/// use bookstore::domain::{Section, SectionId};
///
/// let section = Section::new(SectionId::new(1).unwrap(), " Fiction ").unwrap();
/// assert_eq!(section.name(), "Fiction");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SectionDto", into = "SectionDto")]
pub struct Section {
    id: SectionId,
    name: String,
}

impl Section {
    /// Build a section with an already-assigned identity.
    pub fn new(id: SectionId, name: impl AsRef<str>) -> Result<Self, SectionValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(SectionValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name: name.to_owned(),
        })
    }

    /// Persisted identity.
    #[must_use]
    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SectionDto {
    sectionid: SectionId,
    name: String,
}

impl From<Section> for SectionDto {
    fn from(value: Section) -> Self {
        Self {
            sectionid: value.id,
            name: value.name,
        }
    }
}

impl TryFrom<SectionDto> for Section {
    type Error = SectionValidationError;

    fn try_from(value: SectionDto) -> Result<Self, Self::Error> {
        Self::new(value.sectionid, value.name)
    }
}
