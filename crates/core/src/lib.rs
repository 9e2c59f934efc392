//! Goalwise Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for tracking savings goals.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod contributions;
pub mod dashboard;
pub mod errors;
pub mod events;
pub mod goals;
pub mod identity;
pub mod profiles;
pub mod summary;
pub mod utils;

pub use identity::UserId;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
