//! SQLite storage for reminders.

pub mod model;
pub mod repository;

pub use model::ReminderDB;
pub use repository::ReminderRepository;
