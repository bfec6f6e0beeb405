//! In-memory `LoginService` over a fixed account table.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, Principal, Role};

const SEED_PASSWORD: &str = "password";

struct Account {
    password: Zeroizing<String>,
    roles: BTreeSet<Role>,
}

/// Compare digests of both passwords in constant time.
fn password_matches(stored: &str, supplied: &str) -> bool {
    let stored = Sha256::digest(stored.as_bytes());
    let supplied = Sha256::digest(supplied.as_bytes());
    stored.as_slice().ct_eq(supplied.as_slice()).into()
}

/// Accounts keyed by username.
///
/// [`InMemoryLoginService::seeded`] provides `admin` (ADMIN, DATA, USER),
/// `cinnamon` (DATA, USER) and `barnbarn` (USER), all with password
/// `password`.
#[derive(Default)]
pub struct InMemoryLoginService {
    accounts: BTreeMap<String, Account>,
}

impl InMemoryLoginService {
    /// An empty account table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default seed accounts.
    ///
    /// # Examples
    /// ```
    /// # async fn example() -> Result<(), bookstore::domain::Error> {
    /// use bookstore::domain::ports::LoginService;
    /// use bookstore::domain::{LoginCredentials, Role};
    /// use bookstore::outbound::persistence::InMemoryLoginService;
    ///
    /// let creds = LoginCredentials::try_from_parts("cinnamon", "password")
    ///     .expect("credentials");
    /// let principal = InMemoryLoginService::seeded().authenticate(&creds).await?;
    /// assert!(principal.roles().contains(&Role::Data));
    /// # Ok(())
    /// # }
    /// ```
    pub fn seeded() -> Self {
        Self::new()
            .with_account("admin", SEED_PASSWORD, [Role::Admin, Role::Data, Role::User])
            .with_account("cinnamon", SEED_PASSWORD, [Role::Data, Role::User])
            .with_account("barnbarn", SEED_PASSWORD, [Role::User])
    }

    /// Add or replace one account.
    #[must_use]
    pub fn with_account(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        self.accounts.insert(
            username.into(),
            Account {
                password: Zeroizing::new(password.into()),
                roles: roles.into_iter().collect(),
            },
        );
        self
    }
}

#[async_trait]
impl LoginService for InMemoryLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        match self.accounts.get(credentials.username()) {
            Some(account) if password_matches(&account.password, credentials.password()) => {
                Ok(Principal::new(
                    credentials.username(),
                    account.roles.iter().copied(),
                ))
            }
            _ => {
                debug!(username = credentials.username(), "login rejected");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}
