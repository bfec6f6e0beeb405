//! Driving port for login.
//!
//! Inbound adapters call it to turn credentials into a [`Principal`] without
//! knowing where accounts are stored, so handler tests can substitute a
//! double instead of wiring an account store.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Principal, Role};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated principal.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}

/// Fixture authenticator with two fixed accounts.
///
/// - `admin` / `password` holds ADMIN, DATA and USER.
/// - `reader` / `password` holds USER only.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        if credentials.password() != "password" {
            return Err(Error::unauthorized("invalid credentials"));
        }
        match credentials.username() {
            "admin" => Ok(Principal::new(
                "admin",
                [Role::Admin, Role::Data, Role::User],
            )),
            "reader" => Ok(Principal::new("reader", [Role::User])),
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}
