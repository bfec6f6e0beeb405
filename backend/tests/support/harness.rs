//! Server harness and shared world for HTTP behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` stops the server
//! even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::http::header::{AsHeaderName, HeaderMap};
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use bookstore::Trace;
use bookstore::domain::{Book, BookId, Principal, Role, Section, SectionId, TRACE_ID_HEADER};
use bookstore::inbound::http::auth::{login, logout};
use bookstore::inbound::http::books::books_scope;
use bookstore::inbound::http::error::{json_error_handler, path_error_handler};
use bookstore::inbound::http::guard::{AccessPolicy, RoleGuard};
use bookstore::inbound::http::state::HttpState;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use crate::doubles::{BookResponses, LoginResponse, RecordingBookService, RecordingLoginService};

pub(crate) struct BookWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) books: RecordingBookService,
    pub(crate) login: RecordingLoginService,
    pub(crate) fixture_book: Book,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<String>,
    pub(crate) last_location: Option<String>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) session_cookie: Option<String>,
}

impl BookWorld {
    /// Last body parsed as JSON.
    pub(crate) fn last_json(&self) -> Value {
        let body = self.last_body.as_deref().expect("response body");
        serde_json::from_str(body).expect("json body")
    }
}

pub(crate) type SharedWorld = Rc<RefCell<BookWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn test_session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

async fn spawn_book_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .wrap(RoleGuard::new(AccessPolicy::bookstore()))
            .wrap(test_session_middleware(key.clone()))
            .wrap(Trace)
            .service(books_scope())
            .service(login)
            .service(logout)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

/// `Book{1, "Book", "123234531545", 1, Section{1, "Fiction"}}`.
pub(crate) fn fixture_book() -> Book {
    let section = Section::new(SectionId::new(1).expect("section id"), "Fiction").expect("section");
    Book::new(
        BookId::new(1).expect("book id"),
        "Book",
        "123234531545",
        1,
        section,
    )
    .expect("fixture book")
}

pub(crate) fn world() -> WorldFixture {
    let book = fixture_book();
    let books = RecordingBookService::new(BookResponses::around(&book));
    let login_service = RecordingLoginService::new(LoginResponse::Ok(Principal::new(
        "barnbarn",
        [Role::User],
    )));
    let http_state = HttpState::new(Arc::new(login_service.clone()), Arc::new(books.clone()));

    let (runtime, local) = create_runtime_and_local();
    let (base_url, server) = local
        .block_on(&runtime, spawn_book_server(http_state))
        .expect("spawn book server");

    WorldFixture {
        world: Rc::new(RefCell::new(BookWorld {
            runtime,
            local,
            base_url,
            server,
            books,
            login: login_service,
            fixture_book: book,
            last_status: None,
            last_body: None,
            last_location: None,
            last_trace_id: None,
            session_cookie: None,
        })),
    }
}

fn header_value(headers: &HeaderMap, name: impl AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Log in through `POST /login` and keep the returned session cookie.
pub(crate) fn login_as(world: &SharedWorld, username: &str) {
    let username = username.to_owned();
    let (status, cookie) = with_world_async(world, |base_url| async move {
        let response = Client::default()
            .post(format!("{base_url}/login"))
            .send_json(&serde_json::json!({
                "username": username,
                "password": "password"
            }))
            .await
            .expect("login request");
        let status = response.status().as_u16();
        let cookie = header_value(response.headers(), header::SET_COOKIE)
            .and_then(|value| value.split(';').next().map(str::to_owned));
        (status, cookie)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.session_cookie = cookie;
}

/// Issue one request, sending the stored session cookie when present.
pub(crate) fn perform_request(
    world: &SharedWorld,
    method: Method,
    path: &str,
    payload: Option<Value>,
) {
    let cookie = world.borrow().session_cookie.clone();
    let path = path.to_owned();
    let response = with_world_async(world, |base_url| async move {
        let mut request = Client::default().request(method, format!("{base_url}{path}"));
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect("json request"),
            None => request.send().await.expect("request"),
        };
        let status = response.status().as_u16();
        let cookie_update = header_value(response.headers(), header::SET_COOKIE)
            .and_then(|value| value.split(';').next().map(str::to_owned));
        let location = header_value(response.headers(), header::LOCATION);
        let trace_id = header_value(response.headers(), TRACE_ID_HEADER);
        let body = response.body().await.expect("body");
        let body = String::from_utf8(body.to_vec()).expect("utf-8 body");
        (status, cookie_update, location, trace_id, body)
    });
    let (status, cookie_update, location, trace_id, body) = response;

    let mut ctx = world.borrow_mut();
    if let Some(pair) = cookie_update {
        // A purged session arrives as `session=` with an expiry in the past.
        let cleared = pair
            .split_once('=')
            .is_none_or(|(_, value)| value.is_empty());
        ctx.session_cookie = (!cleared).then_some(pair);
    }
    ctx.last_status = Some(status);
    ctx.last_location = location;
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}
