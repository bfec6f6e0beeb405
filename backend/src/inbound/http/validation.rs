//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose details name the
//! offending wire field and a stable code.

use serde_json::json;

use crate::domain::{BookId, BookValidationError, EntityIdError, Error, SectionId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    NonPositiveId,
    EmptyTitle,
    EmptyIsbn,
    InvalidIsbn,
    YearOutOfRange,
    SectionMismatch,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NonPositiveId => "non_positive_id",
            ErrorCode::EmptyTitle => "empty_title",
            ErrorCode::EmptyIsbn => "empty_isbn",
            ErrorCode::InvalidIsbn => "invalid_isbn",
            ErrorCode::YearOutOfRange => "publication_year_out_of_range",
            ErrorCode::SectionMismatch => "section_mismatch",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn id_error(field: FieldName, err: EntityIdError) -> Error {
    let EntityIdError::NonPositive { value, .. } = err;
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": ErrorCode::NonPositiveId.as_str(),
    }))
}

pub(crate) fn parse_book_id(raw: i64, field: FieldName) -> Result<BookId, Error> {
    BookId::new(raw).map_err(|err| id_error(field, err))
}

pub(crate) fn parse_section_id(raw: i64, field: FieldName) -> Result<SectionId, Error> {
    SectionId::new(raw).map_err(|err| id_error(field, err))
}

/// Map book field validation failures to their wire field names.
pub(crate) fn book_validation_error(err: BookValidationError) -> Error {
    let message = err.to_string();
    match err {
        BookValidationError::EmptyTitle => {
            field_error(FieldName::new("title"), ErrorCode::EmptyTitle, message)
        }
        BookValidationError::EmptyIsbn => {
            field_error(FieldName::new("isbn"), ErrorCode::EmptyIsbn, message)
        }
        BookValidationError::InvalidIsbn => {
            field_error(FieldName::new("isbn"), ErrorCode::InvalidIsbn, message)
        }
        BookValidationError::PublicationYearOutOfRange { min, max, value } => {
            Error::invalid_request(message).with_details(json!({
                "field": "publicationYear",
                "code": ErrorCode::YearOutOfRange.as_str(),
                "min": min,
                "max": max,
                "value": value,
            }))
        }
        BookValidationError::SectionMismatch { .. } => field_error(
            FieldName::new("section"),
            ErrorCode::SectionMismatch,
            message,
        ),
    }
}
