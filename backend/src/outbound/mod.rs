//! Outbound adapters implementing the driven ports.
//!
//! Adapters translate between domain types and their storage representation
//! and hold no business rules of their own.

pub mod persistence;
