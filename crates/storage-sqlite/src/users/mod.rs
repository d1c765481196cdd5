//! SQLite storage for users.

pub mod model;
pub mod repository;

pub use model::UserDB;
pub use repository::UserRepository;
