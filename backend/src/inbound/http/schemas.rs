//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror the wire shape of their domain counterparts and live
//! in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "section 24 does not exist")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, typically `{field, code}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Section`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Section)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SectionSchema {
    /// Persisted section identifier.
    #[schema(example = 1, minimum = 1)]
    sectionid: i64,
    /// Section name.
    #[schema(example = "Fiction")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::Book`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Book, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BookSchema {
    /// Persisted book identifier.
    #[schema(example = 1, minimum = 1)]
    bookid: i64,
    /// Book title.
    #[schema(example = "Book")]
    title: String,
    /// ISBN made of digits, hyphens and an optional trailing `X`.
    #[schema(example = "123234531545")]
    isbn: String,
    /// Year of publication.
    #[schema(example = 2020, minimum = 1, maximum = 9999)]
    publication_year: i32,
    /// Section the book is shelved in.
    section: SectionSchema,
}

/// OpenAPI schema for [`crate::domain::Role`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    /// Full administrative access.
    #[schema(rename = "ADMIN")]
    Admin,
    /// May create, update and delete catalogue data.
    #[schema(rename = "DATA")]
    Data,
    /// May read catalogue data.
    #[schema(rename = "USER")]
    User,
}

/// OpenAPI schema for [`crate::domain::Principal`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Principal)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PrincipalSchema {
    /// Account name.
    #[schema(example = "cinnamon")]
    username: String,
    /// Granted roles in ascending order.
    roles: Vec<RoleSchema>,
}
