//! Role-based access guard.
//!
//! [`AccessPolicy`] is an explicit table from `(method, route pattern)` to a
//! [`RoleRequirement`]. [`RoleGuard`] resolves the matched pattern of each
//! request, reads the principal from the session and rejects the request
//! before the handler runs when the requirement is not met.
//!
//! The guard must sit inside the session middleware:
//!
//! ```text
//! App::new().wrap(RoleGuard::new(policy)).wrap(session).wrap(Trace)
//! ```

use std::collections::BTreeSet;
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{Error, Principal, Role};
use crate::inbound::http::session::SessionContext;

/// What a caller must present to reach a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    /// No session needed.
    Public,
    /// Any logged-in principal.
    Authenticated,
    /// A principal holding at least one of the listed roles.
    AnyOf(BTreeSet<Role>),
}

impl RoleRequirement {
    /// Requirement satisfied by any one of `roles`.
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::AnyOf(roles.into_iter().collect())
    }

    /// Decide whether `principal` may proceed.
    ///
    /// # Examples
    /// ```
    /// use bookstore::domain::{ErrorCode, Principal, Role};
    /// use bookstore::inbound::http::guard::RoleRequirement;
    ///
    /// let writers = RoleRequirement::any_of([Role::Admin, Role::Data]);
    /// let reader = Principal::new("barnbarn", [Role::User]);
    /// let err = writers.authorise(Some(&reader)).unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::Forbidden);
    /// ```
    pub fn authorise(&self, principal: Option<&Principal>) -> Result<(), Error> {
        match (self, principal) {
            (Self::Public, _) => Ok(()),
            (_, None) => Err(Error::unauthorized("login required")),
            (Self::Authenticated, Some(_)) => Ok(()),
            (Self::AnyOf(roles), Some(principal)) if principal.has_any_role(roles) => Ok(()),
            (Self::AnyOf(roles), Some(_)) => {
                let required: Vec<&str> = roles.iter().map(|role| role.as_str()).collect();
                Err(Error::forbidden("insufficient role for this operation")
                    .with_details(serde_json::json!({ "requiredRoles": required })))
            }
        }
    }
}

#[derive(Debug, Clone)]
struct AccessRule {
    method: Method,
    pattern: String,
    requirement: RoleRequirement,
}

/// Table of per-route role requirements.
///
/// Patterns are the route templates registered with the router, for example
/// `/books/book/{id}`. Matched routes with no rule require an authenticated
/// principal.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
    public_prefixes: Vec<String>,
}

impl AccessPolicy {
    /// Empty policy: every matched route requires authentication.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `method` on `pattern`.
    #[must_use]
    pub fn rule(
        mut self,
        method: Method,
        pattern: impl Into<String>,
        requirement: RoleRequirement,
    ) -> Self {
        let pattern = pattern.into();
        self.rules
            .retain(|rule| !(rule.method == method && rule.pattern == pattern));
        self.rules.push(AccessRule {
            method,
            pattern,
            requirement,
        });
        self
    }

    /// Treat every pattern under `prefix` as public regardless of method.
    #[must_use]
    pub fn public_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.public_prefixes.push(prefix.into());
        self
    }

    /// Policy for the bookstore routes.
    ///
    /// Reads need a session; writes need ADMIN or DATA.
    pub fn bookstore() -> Self {
        let writers = || RoleRequirement::any_of([Role::Admin, Role::Data]);
        Self::new()
            .rule(Method::POST, "/login", RoleRequirement::Public)
            .rule(Method::POST, "/logout", RoleRequirement::Public)
            .rule(Method::GET, "/health/ready", RoleRequirement::Public)
            .rule(Method::GET, "/health/live", RoleRequirement::Public)
            .rule(Method::GET, "/books/books", RoleRequirement::Authenticated)
            .rule(Method::GET, "/books/book/{id}", RoleRequirement::Authenticated)
            .rule(Method::POST, "/books/book", writers())
            .rule(Method::PUT, "/books/book/{id}", writers())
            .rule(Method::DELETE, "/books/book/{id}", writers())
            .public_prefix("/docs")
            .public_prefix("/api-docs")
    }

    /// Requirement applying to `method` on the matched `pattern`.
    pub fn requirement_for(&self, method: &Method, pattern: &str) -> RoleRequirement {
        if self
            .public_prefixes
            .iter()
            .any(|prefix| pattern.starts_with(prefix.as_str()))
        {
            return RoleRequirement::Public;
        }
        self.rules
            .iter()
            .find(|rule| &rule.method == method && rule.pattern == pattern)
            .map_or(RoleRequirement::Authenticated, |rule| {
                rule.requirement.clone()
            })
    }

    fn check(&self, req: &ServiceRequest) -> Result<(), Error> {
        // Unmatched requests fall through so the router answers 404.
        let Some(pattern) = req.match_pattern() else {
            return Ok(());
        };
        let requirement = self.requirement_for(req.method(), &pattern);
        if requirement == RoleRequirement::Public {
            return Ok(());
        }
        let principal = SessionContext::new(req.get_session()).principal()?;
        let outcome = requirement.authorise(principal.as_ref());
        if let Err(error) = &outcome {
            debug!(
                method = %req.method(),
                pattern = %pattern,
                username = principal.as_ref().map(Principal::username),
                code = ?error.code(),
                "request rejected by role guard"
            );
        }
        outcome
    }
}

/// Middleware enforcing an [`AccessPolicy`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bookstore::inbound::http::guard::{AccessPolicy, RoleGuard};
///
/// let _app = App::new().wrap(RoleGuard::new(AccessPolicy::bookstore()));
/// ```
#[derive(Clone)]
pub struct RoleGuard {
    policy: Rc<AccessPolicy>,
}

impl RoleGuard {
    /// Guard requests with `policy`.
    pub fn new(policy: AccessPolicy) -> Self {
        Self {
            policy: Rc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RoleGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGuardMiddleware {
            service,
            policy: Rc::clone(&self.policy),
        }))
    }
}

/// Service wrapper produced by [`RoleGuard`].
pub struct RoleGuardMiddleware<S> {
    service: S,
    policy: Rc<AccessPolicy>,
}

impl<S, B> Service<ServiceRequest> for RoleGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.policy.check(&req) {
            Ok(()) => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(error) => {
                let res = req.error_response(error).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
