//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers and the role
//! guard only deal with domain-friendly operations on a [`Principal`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Principal};

pub(crate) const PRINCIPAL_KEY: &str = "principal";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated principal in the session cookie.
    ///
    /// The session id is renewed first so a pre-login cookie cannot be
    /// replayed as an authenticated one.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(PRINCIPAL_KEY, principal)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current principal from the session, if present.
    ///
    /// A cookie whose payload no longer decodes is treated as anonymous.
    pub fn principal(&self) -> Result<Option<Principal>, Error> {
        match self.0.get::<Principal>(PRINCIPAL_KEY) {
            Ok(principal) => Ok(principal),
            Err(error) => {
                tracing::warn!("invalid principal in session cookie: {error}");
                self.0.remove(PRINCIPAL_KEY);
                Ok(None)
            }
        }
    }

    /// Drop every value held in the session and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
