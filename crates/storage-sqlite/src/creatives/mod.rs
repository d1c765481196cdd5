//! SQLite storage for creatives.

pub mod model;
pub mod repository;

pub use model::CreativeDB;
pub use repository::CreativeRepository;
