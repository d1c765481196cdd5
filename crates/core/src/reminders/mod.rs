//! Reminders module.

mod reminders_model;
mod reminders_service;
mod reminders_traits;

pub use reminders_model::{NewReminder, Reminder, ReminderUpdate};
pub use reminders_service::ReminderService;
pub use reminders_traits::{ReminderRepositoryTrait, ReminderServiceTrait};
