//! Integer identities assigned by persistence.
//!
//! Ids are positive and serialise as bare JSON numbers so payloads keep the
//! `{"bookid": 1}` shape clients already consume.

use std::fmt;

/// Validation error for entity identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EntityIdError {
    /// Identifier was zero or negative.
    #[error("{entity} id must be positive, got {value}")]
    NonPositive {
        /// Entity the identifier belongs to.
        entity: &'static str,
        /// Rejected raw value.
        value: i64,
    },
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(raw: i64) -> Result<Self, EntityIdError> {
                if raw <= 0 {
                    return Err(EntityIdError::NonPositive {
                        entity: $entity,
                        value: raw,
                    });
                }
                Ok(Self(raw))
            }

            /// Raw integer value.
            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = EntityIdError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_entity_id!(
    /// Identity of a persisted [`crate::domain::Book`].
    ///
    /// # Examples
    /// ```
    /// use bookstore::domain::BookId;
    ///
    /// assert_eq!(BookId::new(24).expect("positive").get(), 24);
    /// assert!(BookId::new(0).is_err());
    /// ```
    BookId,
    "book"
);

define_entity_id!(
    /// Identity of a persisted [`crate::domain::Section`].
    SectionId,
    "section"
);
