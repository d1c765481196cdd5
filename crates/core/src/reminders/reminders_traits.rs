//! Traits for reminder repository and service.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::Result;

use super::{NewReminder, Reminder, ReminderUpdate};

/// Repository trait for reminder persistence.
#[async_trait]
pub trait ReminderRepositoryTrait: Send + Sync {
    fn get_reminders(&self) -> Result<Vec<Reminder>>;
    fn get_reminder(&self, id: &str) -> Result<Option<Reminder>>;
    async fn create_reminder(&self, new_reminder: NewReminder) -> Result<Reminder>;
    async fn update_reminder(&self, id: &str, update: ReminderUpdate) -> Result<Reminder>;
    async fn delete_reminder(&self, id: &str) -> Result<usize>;
}

/// Service trait for reminder business logic.
#[async_trait]
pub trait ReminderServiceTrait: Send + Sync {
    fn get_reminders(&self) -> Result<Vec<Reminder>>;

    /// Not-done reminders due at or before `now`, soonest first.
    fn get_due(&self, now: NaiveDateTime) -> Result<Vec<Reminder>>;

    async fn create_reminder(&self, new_reminder: NewReminder) -> Result<Reminder>;
    async fn update_reminder(&self, id: &str, update: ReminderUpdate) -> Result<Reminder>;
    async fn mark_done(&self, id: &str) -> Result<Reminder>;
    async fn delete_reminder(&self, id: &str) -> Result<usize>;
}
