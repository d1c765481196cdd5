//! Reminder domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    pub remind_at: NaiveDateTime,
    pub is_done: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data for creating a new reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub id: Option<String>,
    pub title: String,
    pub notes: Option<String>,
    pub remind_at: NaiveDateTime,
}

/// Partial update for a reminder. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReminderUpdate {
    pub title: Option<String>,
    pub notes: Option<Option<String>>,
    pub remind_at: Option<NaiveDateTime>,
    pub is_done: Option<bool>,
}
