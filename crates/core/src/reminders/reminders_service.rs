//! Reminder service implementation.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::errors::{Error, Result, ValidationError};

use super::{
    NewReminder, Reminder, ReminderRepositoryTrait, ReminderServiceTrait, ReminderUpdate,
};

pub struct ReminderService {
    repository: Arc<dyn ReminderRepositoryTrait>,
}

impl ReminderService {
    pub fn new(repository: Arc<dyn ReminderRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn validated_title(title: &str) -> Result<String> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        Ok(trimmed.to_string())
    }
}

#[async_trait]
impl ReminderServiceTrait for ReminderService {
    fn get_reminders(&self) -> Result<Vec<Reminder>> {
        self.repository.get_reminders()
    }

    fn get_due(&self, now: NaiveDateTime) -> Result<Vec<Reminder>> {
        let mut due: Vec<Reminder> = self
            .repository
            .get_reminders()?
            .into_iter()
            .filter(|r| !r.is_done && r.remind_at <= now)
            .collect();
        due.sort_by(|a, b| a.remind_at.cmp(&b.remind_at));
        Ok(due)
    }

    async fn create_reminder(&self, new_reminder: NewReminder) -> Result<Reminder> {
        let title = Self::validated_title(&new_reminder.title)?;
        self.repository
            .create_reminder(NewReminder {
                title,
                ..new_reminder
            })
            .await
    }

    async fn update_reminder(&self, id: &str, update: ReminderUpdate) -> Result<Reminder> {
        let update = match update.title {
            Some(title) => ReminderUpdate {
                title: Some(Self::validated_title(&title)?),
                ..update
            },
            None => update,
        };
        self.repository.update_reminder(id, update).await
    }

    async fn mark_done(&self, id: &str) -> Result<Reminder> {
        self.repository
            .update_reminder(
                id,
                ReminderUpdate {
                    is_done: Some(true),
                    ..Default::default()
                },
            )
            .await
    }

    async fn delete_reminder(&self, id: &str) -> Result<usize> {
        self.repository.delete_reminder(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::RwLock;

    struct MockReminderRepository {
        reminders: RwLock<Vec<Reminder>>,
    }

    #[async_trait]
    impl ReminderRepositoryTrait for MockReminderRepository {
        fn get_reminders(&self) -> Result<Vec<Reminder>> {
            Ok(self.reminders.read().unwrap().clone())
        }
        fn get_reminder(&self, _: &str) -> Result<Option<Reminder>> {
            unimplemented!()
        }
        async fn create_reminder(&self, _: NewReminder) -> Result<Reminder> {
            unimplemented!()
        }
        async fn update_reminder(&self, _: &str, _: ReminderUpdate) -> Result<Reminder> {
            unimplemented!()
        }
        async fn delete_reminder(&self, _: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    fn reminder(id: &str, day: u32, hour: u32, done: bool) -> Reminder {
        let at = NaiveDate::from_ymd_opt(2026, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        Reminder {
            id: id.to_string(),
            title: format!("Reminder {}", id),
            notes: None,
            remind_at: at,
            is_done: done,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn due_excludes_done_and_future_and_sorts_soonest_first() {
        let repo = Arc::new(MockReminderRepository {
            reminders: RwLock::new(vec![
                reminder("a", 10, 9, false),
                reminder("b", 2, 8, false),
                reminder("c", 3, 8, true),
                reminder("d", 25, 8, false),
            ]),
        });
        let now = NaiveDate::from_ymd_opt(2026, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let due = ReminderService::new(repo).get_due(now).unwrap();
        let ids: Vec<&str> = due.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
