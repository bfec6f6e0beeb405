//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod books;
pub mod error;
pub mod guard;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub(crate) mod validation;

pub use error::ApiResult;
