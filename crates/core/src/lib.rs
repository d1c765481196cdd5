//! Markops Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for the markops dashboard.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod campaigns;
pub mod creatives;
pub mod errors;
pub mod posts;
pub mod reminders;
pub mod taxonomy;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
