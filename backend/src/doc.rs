//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the schema
//! wrappers from [`crate::inbound::http::schemas`] together with the request
//! bodies, and the session cookie security scheme.
//!
//! The document backs Swagger UI in debug builds and is exported via
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::books::{BookRequestBody, SectionRefBody};
use crate::inbound::http::schemas::{
    BookSchema, ErrorCodeSchema, ErrorSchema, PrincipalSchema, RoleSchema, SectionSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bookstore backend API",
        description = "Session-authenticated book catalogue with role-gated writes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::create_book,
        crate::inbound::http::books::update_book,
        crate::inbound::http::books::delete_book,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        BookSchema,
        SectionSchema,
        ErrorSchema,
        ErrorCodeSchema,
        PrincipalSchema,
        RoleSchema,
        BookRequestBody,
        SectionRefBody,
        LoginRequest
    )),
    tags(
        (name = "books", description = "Book catalogue"),
        (name = "auth", description = "Session login and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
