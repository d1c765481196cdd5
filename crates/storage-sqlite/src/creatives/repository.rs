//! Repository implementation for creatives.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use markops_core::creatives::{Creative, CreativeRepositoryTrait, CreativeUpdate, NewCreative};
use markops_core::errors::{DatabaseError, Error};
use markops_core::Result;

use super::model::CreativeDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::creatives;
use crate::utils::{date_to_text, datetime_to_text};

pub struct CreativeRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CreativeRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CreativeRepositoryTrait for CreativeRepository {
    fn get_creatives(&self) -> Result<Vec<Creative>> {
        let mut conn = get_connection(&self.pool)?;
        let results = creatives::table
            .order(creatives::due_on.asc())
            .load::<CreativeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(Creative::from).collect())
    }

    fn get_creative(&self, id: &str) -> Result<Option<Creative>> {
        let mut conn = get_connection(&self.pool)?;
        let result = creatives::table
            .find(id)
            .first::<CreativeDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(Creative::from))
    }

    fn count_by_assignee(&self, assignee_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let count: i64 = creatives::table
            .filter(creatives::assignee_id.eq(assignee_id))
            .count()
            .get_result(&mut conn)
            .map_err(StorageError::from)?;
        Ok(count as usize)
    }

    async fn create_creative(&self, new_creative: NewCreative) -> Result<Creative> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Creative> {
                let now = datetime_to_text(Utc::now().naive_utc());
                let db = CreativeDB {
                    id: new_creative
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    title: new_creative.title,
                    asset_kind: new_creative.asset_kind.as_str().to_string(),
                    status: new_creative.status.as_str().to_string(),
                    campaign_id: new_creative.campaign_id,
                    assignee_id: new_creative.assignee_id,
                    due_on: new_creative.due_on.map(date_to_text),
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(creatives::table)
                    .values(&db)
                    .returning(CreativeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(Creative::from(result))
            })
            .await
    }

    async fn update_creative(&self, id: &str, update: CreativeUpdate) -> Result<Creative> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Creative> {
                let mut db = creatives::table
                    .find(&id)
                    .first::<CreativeDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "Creative '{}' not found",
                            id
                        )))
                    })?;

                db.apply_update(update);
                db.updated_at = datetime_to_text(Utc::now().naive_utc());

                diesel::update(creatives::table.find(&id))
                    .set(&db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(Creative::from(db))
            })
            .await
    }

    async fn delete_creative(&self, id: &str) -> Result<usize> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(creatives::table.find(&id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
