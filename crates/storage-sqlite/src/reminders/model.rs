//! Database models for reminders.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use markops_core::reminders::{Reminder, ReminderUpdate};

use crate::utils::{datetime_to_text, text_to_datetime};

/// Database model for reminders
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    Insertable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::reminders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ReminderDB {
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    pub remind_at: String,
    pub is_done: i32, // Schema uses Integer
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReminderDB> for Reminder {
    fn from(db: ReminderDB) -> Self {
        Reminder {
            id: db.id,
            title: db.title,
            notes: db.notes,
            remind_at: text_to_datetime(&db.remind_at),
            is_done: db.is_done != 0,
            created_at: text_to_datetime(&db.created_at),
            updated_at: text_to_datetime(&db.updated_at),
        }
    }
}

impl From<Reminder> for ReminderDB {
    fn from(reminder: Reminder) -> Self {
        ReminderDB {
            id: reminder.id,
            title: reminder.title,
            notes: reminder.notes,
            remind_at: datetime_to_text(reminder.remind_at),
            is_done: reminder.is_done as i32,
            created_at: datetime_to_text(reminder.created_at),
            updated_at: datetime_to_text(reminder.updated_at),
        }
    }
}

impl ReminderDB {
    /// Merges a partial update into this row. Timestamps are bumped by the
    /// repository, not here.
    pub fn apply_update(&mut self, update: ReminderUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        if let Some(remind_at) = update.remind_at {
            self.remind_at = datetime_to_text(remind_at);
        }
        if let Some(is_done) = update.is_done {
            self.is_done = is_done as i32;
        }
    }
}
