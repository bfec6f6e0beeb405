//! Request middleware.
//!
//! Purpose: lifecycle concerns shared by every route. [`Trace`] scopes a
//! trace identifier around each request and logs its outcome.

pub mod trace;

pub use trace::Trace;
