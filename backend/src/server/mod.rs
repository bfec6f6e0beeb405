//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::body::MessageBody;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use bookstore::Trace;
#[cfg(debug_assertions)]
use bookstore::doc::ApiDoc;
use bookstore::inbound::http::auth::{login, logout};
use bookstore::inbound::http::books::books_scope;
use bookstore::inbound::http::error::{json_error_handler, path_error_handler};
use bookstore::inbound::http::guard::{AccessPolicy, RoleGuard};
use bookstore::inbound::http::health::{HealthState, live, ready};
use bookstore::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(RoleGuard::new(AccessPolicy::bookstore()))
        .wrap(session)
        .wrap(Trace)
        .service(books_scope())
        .service(login)
        .service(logout)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the listener is bound.
/// - `config`: pre-built [`ServerConfig`] with session, binding and seed settings.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding state or binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        sections: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use bookstore::inbound::http::auth::LoginRequest;
    use rstest::rstest;

    fn deps() -> AppDependencies {
        let config = ServerConfig::new(
            Key::generate(),
            false,
            SameSite::Lax,
            "127.0.0.1:0".parse().expect("literal addr"),
        )
        .with_sections(vec!["Fiction".to_owned()]);
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&config).expect("state"),
            key: config.key.clone(),
            cookie_secure: config.cookie_secure,
            same_site: config.same_site,
        }
    }

    #[rstest]
    #[case("/books/books", StatusCode::UNAUTHORIZED)]
    #[case("/health/live", StatusCode::OK)]
    #[case("/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[case("/no/such/route", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn routes_are_guarded_as_configured(#[case] uri: &str, #[case] expected: StatusCode) {
        let app = actix_test::init_service(build_app(deps())).await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), expected);
        assert!(res.headers().contains_key("trace-id"));
    }

    #[actix_web::test]
    async fn seeded_admin_can_log_in_and_list_books() {
        let app = actix_test::init_service(build_app(deps())).await;
        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(&LoginRequest {
                    username: "admin".into(),
                    password: "password".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let list_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/books/books")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(list_res.status(), StatusCode::OK);
        let body = actix_test::read_body(list_res).await;
        assert_eq!(body.as_ref(), b"[]");
    }
}
