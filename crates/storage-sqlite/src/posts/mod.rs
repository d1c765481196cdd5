//! SQLite storage for posts.

pub mod model;
pub mod repository;

pub use model::PostDB;
pub use repository::PostRepository;
