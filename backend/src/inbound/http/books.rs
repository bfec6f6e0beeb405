//! Book catalogue HTTP handlers.
//!
//! ```text
//! GET    /books/books
//! GET    /books/book/{id}
//! POST   /books/book        {"title":"testBook","isbn":"987654323","publicationYear":1998,"section":{"sectionid":24}}
//! PUT    /books/book/{id}
//! DELETE /books/book/{id}
//! ```
//!
//! Role checks happen in [`crate::inbound::http::guard::RoleGuard`] before
//! these handlers run.

use actix_web::http::header;
use actix_web::{HttpResponse, Scope, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookDraft, BookId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{BookSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, book_validation_error, parse_book_id, parse_section_id,
};

/// Section reference inside a book payload.
///
/// Only `sectionid` is used; `name` is accepted so clients can send back a
/// book exactly as they received it.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SectionRefBody {
    #[schema(example = 1, minimum = 1)]
    pub sectionid: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request payload for creating or replacing a book.
///
/// `bookid` is ignored; the path or persistence decides identity.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookid: Option<i64>,
    #[schema(example = "testBook")]
    pub title: String,
    #[schema(example = "987654323")]
    pub isbn: String,
    #[schema(example = 1998)]
    pub publication_year: i32,
    pub section: SectionRefBody,
}

impl TryFrom<BookRequestBody> for BookDraft {
    type Error = Error;

    fn try_from(value: BookRequestBody) -> Result<Self, Self::Error> {
        let section_id = parse_section_id(
            value.section.sectionid,
            FieldName::new("section.sectionid"),
        )?;
        BookDraft::try_new(
            &value.title,
            &value.isbn,
            value.publication_year,
            section_id,
        )
        .map_err(book_validation_error)
    }
}

fn path_book_id(path: web::Path<i64>) -> Result<BookId, Error> {
    parse_book_id(path.into_inner(), FieldName::new("id"))
}

/// All book routes mounted under `/books`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bookstore::inbound::http::books::books_scope;
///
/// let _app = App::new().service(books_scope());
/// ```
pub fn books_scope() -> Scope {
    web::scope("/books")
        .service(list_books)
        .service(get_book)
        .service(create_book)
        .service(update_book)
        .service(delete_book)
}

/// List every book.
#[utoipa::path(
    get,
    path = "/books/books",
    responses(
        (status = 200, description = "All books", body = [BookSchema]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listAllBooks",
    security(("SessionCookie" = []))
)]
#[get("/books")]
pub async fn list_books(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let books = state.books.find_all().await?;
    Ok(HttpResponse::Ok().json(books))
}

/// Fetch one book.
///
/// An unknown id answers `404` with an empty body.
#[utoipa::path(
    get,
    path = "/books/book/{id}",
    params(("id" = i64, Path, description = "Book identifier", minimum = 1)),
    responses(
        (status = 200, description = "The book", body = BookSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "No book has this id; empty body")
    ),
    tags = ["books"],
    operation_id = "getBookById",
    security(("SessionCookie" = []))
)]
#[get("/book/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path_book_id(path)?;
    match state.books.find_book_by_id(id).await? {
        Some(book) => Ok(HttpResponse::Ok().json(book)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Create a book.
#[utoipa::path(
    post,
    path = "/books/book",
    request_body = BookRequestBody,
    responses(
        (status = 201, description = "Book created", body = BookSchema,
            headers(("Location" = String, description = "URI of the new book"))),
        (status = 400, description = "Invalid request or unknown section", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Requires ADMIN or DATA", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "addNewBook",
    security(("SessionCookie" = []))
)]
#[post("/book")]
pub async fn create_book(
    state: web::Data<HttpState>,
    payload: web::Json<BookRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = BookDraft::try_from(payload.into_inner())?;
    let book = state.books.save(draft).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/books/book/{}", book.id())))
        .json(book))
}

/// Replace every field of a book.
#[utoipa::path(
    put,
    path = "/books/book/{id}",
    params(("id" = i64, Path, description = "Book identifier", minimum = 1)),
    request_body = BookRequestBody,
    responses(
        (status = 200, description = "Book replaced", body = BookSchema),
        (status = 400, description = "Invalid request or unknown section", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Requires ADMIN or DATA", body = ErrorSchema),
        (status = 404, description = "No book has this id", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "updateFullBook",
    security(("SessionCookie" = []))
)]
#[put("/book/{id}")]
pub async fn update_book(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<BookRequestBody>,
) -> ApiResult<HttpResponse> {
    let id = path_book_id(path)?;
    let draft = BookDraft::try_from(payload.into_inner())?;
    let book = state.books.update(draft, id).await?;
    Ok(HttpResponse::Ok().json(book))
}

/// Delete a book.
#[utoipa::path(
    delete,
    path = "/books/book/{id}",
    params(("id" = i64, Path, description = "Book identifier", minimum = 1)),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Requires ADMIN or DATA", body = ErrorSchema),
        (status = 404, description = "No book has this id", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "deleteBookById",
    security(("SessionCookie" = []))
)]
#[delete("/book/{id}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path_book_id(path)?;
    state.books.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "books_tests.rs"]
mod tests;
