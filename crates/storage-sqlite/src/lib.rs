//! SQLite storage implementation for GoalWise.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `goalwise-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for goals, the contribution ledger and profiles
//! - Database-specific model types (with Diesel derives)
//!
//! Reads go through the r2d2 pool. Every write is funnelled through a single
//! writer actor, which is what makes read-modify-write sequences such as
//! appending a contribution atomic.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod contributions;
pub mod goals;
pub mod profiles;

mod utils;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from goalwise-core for convenience
pub use goalwise_core::errors::{DatabaseError, Error, Result};

#[cfg(test)]
pub(crate) mod test_support;
