//! Repository implementation for reminders.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use markops_core::errors::{DatabaseError, Error};
use markops_core::reminders::{NewReminder, Reminder, ReminderRepositoryTrait, ReminderUpdate};
use markops_core::Result;

use super::model::ReminderDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::reminders;
use crate::utils::datetime_to_text;

pub struct ReminderRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ReminderRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ReminderRepositoryTrait for ReminderRepository {
    fn get_reminders(&self) -> Result<Vec<Reminder>> {
        let mut conn = get_connection(&self.pool)?;
        let results = reminders::table
            .order(reminders::remind_at.asc())
            .load::<ReminderDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(Reminder::from).collect())
    }

    fn get_reminder(&self, id: &str) -> Result<Option<Reminder>> {
        let mut conn = get_connection(&self.pool)?;
        let result = reminders::table
            .find(id)
            .first::<ReminderDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(Reminder::from))
    }

    async fn create_reminder(&self, new_reminder: NewReminder) -> Result<Reminder> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Reminder> {
                let now = datetime_to_text(Utc::now().naive_utc());
                let db = ReminderDB {
                    id: new_reminder
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    title: new_reminder.title,
                    notes: new_reminder.notes,
                    remind_at: datetime_to_text(new_reminder.remind_at),
                    is_done: 0,
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(reminders::table)
                    .values(&db)
                    .returning(ReminderDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(Reminder::from(result))
            })
            .await
    }

    async fn update_reminder(&self, id: &str, update: ReminderUpdate) -> Result<Reminder> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Reminder> {
                let mut db = reminders::table
                    .find(&id)
                    .first::<ReminderDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "Reminder '{}' not found",
                            id
                        )))
                    })?;

                db.apply_update(update);
                db.updated_at = datetime_to_text(Utc::now().naive_utc());

                diesel::update(reminders::table.find(&id))
                    .set(&db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(Reminder::from(db))
            })
            .await
    }

    async fn delete_reminder(&self, id: &str) -> Result<usize> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(reminders::table.find(&id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
