//! Repository implementation for users.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use markops_core::errors::{DatabaseError, Error};
use markops_core::users::{NewUser, User, UserRepositoryTrait, UserUpdate};
use markops_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::utils::datetime_to_text;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let results = users::table
            .order(users::display_name.asc())
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(User::from).collect())
    }

    fn get_user(&self, id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let result = users::table
            .find(id)
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(User::from))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = datetime_to_text(Utc::now().naive_utc());
                let db = UserDB {
                    id: new_user.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    display_name: new_user.display_name,
                    email: new_user.email,
                    role: new_user.role.as_str().to_string(),
                    is_active: 1,
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(users::table)
                    .values(&db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(User::from(result))
            })
            .await
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let mut db = users::table
                    .find(&id)
                    .first::<UserDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "User '{}' not found",
                            id
                        )))
                    })?;

                db.apply_update(update);
                db.updated_at = datetime_to_text(Utc::now().naive_utc());

                diesel::update(users::table.find(&id))
                    .set(&db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(User::from(db))
            })
            .await
    }

    async fn delete_user(&self, id: &str) -> Result<usize> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(users::table.find(&id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
