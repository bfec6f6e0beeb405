//! Builders for the HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use bookstore::domain::BookCatalogueService;
use bookstore::inbound::http::state::HttpState;
use bookstore::outbound::persistence::{
    InMemoryBookRepository, InMemoryLoginService, InMemorySectionRepository,
};

use super::ServerConfig;

/// Build the shared HTTP state over the in-memory adapters.
///
/// # Errors
/// Returns [`std::io::Error`] when a configured section name is blank.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let sections = InMemorySectionRepository::seeded(&config.sections)
        .map_err(|err| std::io::Error::other(format!("invalid section seed: {err}")))?;
    let books = BookCatalogueService::new(
        Arc::new(InMemoryBookRepository::new()),
        Arc::new(sections),
    );

    Ok(web::Data::new(HttpState::new(
        Arc::new(InMemoryLoginService::seeded()),
        Arc::new(books),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::{Key, SameSite};
    use bookstore::domain::{BookDraft, ErrorCode, SectionId};
    use rstest::rstest;

    fn config(sections: &[&str]) -> ServerConfig {
        ServerConfig::new(
            Key::generate(),
            false,
            SameSite::Lax,
            "127.0.0.1:0".parse().expect("literal addr"),
        )
        .with_sections(sections.iter().map(|name| (*name).to_owned()).collect())
    }

    fn draft(section: i64) -> BookDraft {
        BookDraft::try_new(
            "testBook",
            "987654323",
            1998,
            SectionId::new(section).expect("section id"),
        )
        .expect("draft")
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_sections_back_the_catalogue() {
        let state = build_http_state(&config(&["Fiction", "Travel"])).expect("state");

        let saved = state.books.save(draft(2)).await.expect("save");
        assert_eq!(saved.section().name(), "Travel");

        let err = state.books.save(draft(3)).await.expect_err("unknown section");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn blank_section_names_fail_start_up() {
        let result = build_http_state(&config(&["Fiction", " "]));
        assert!(result.is_err());
    }
}
