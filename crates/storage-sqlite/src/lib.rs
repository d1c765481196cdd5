//! SQLite storage implementation for markops.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `markops-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. `markops-core` is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod campaigns;
pub mod creatives;
pub mod posts;
pub mod reminders;
pub mod taxonomy;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from markops-core for convenience
pub use markops_core::errors::{DatabaseError, Error, Result};
