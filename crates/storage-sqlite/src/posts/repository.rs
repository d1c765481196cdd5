//! Repository implementation for posts.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use markops_core::errors::{DatabaseError, Error};
use markops_core::posts::{NewPost, Post, PostRepositoryTrait, PostUpdate};
use markops_core::Result;

use super::model::PostDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::posts;
use crate::utils::datetime_to_text;

pub struct PostRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PostRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PostRepositoryTrait for PostRepository {
    fn get_posts(&self) -> Result<Vec<Post>> {
        let mut conn = get_connection(&self.pool)?;
        let results = posts::table
            .order(posts::scheduled_for.asc())
            .load::<PostDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(Post::from).collect())
    }

    fn get_post(&self, id: &str) -> Result<Option<Post>> {
        let mut conn = get_connection(&self.pool)?;
        let result = posts::table
            .find(id)
            .first::<PostDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(Post::from))
    }

    async fn create_post(&self, new_post: NewPost) -> Result<Post> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Post> {
                let now = datetime_to_text(Utc::now().naive_utc());
                let db = PostDB {
                    id: new_post.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    title: new_post.title,
                    body: new_post.body,
                    status: new_post.status.as_str().to_string(),
                    platform: new_post.platform,
                    scheduled_for: new_post.scheduled_for.map(datetime_to_text),
                    main_category_id: new_post.main_category_id,
                    sub_category_id: new_post.sub_category_id,
                    brand_type_id: new_post.brand_type_id,
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(posts::table)
                    .values(&db)
                    .returning(PostDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(Post::from(result))
            })
            .await
    }

    async fn update_post(&self, id: &str, update: PostUpdate) -> Result<Post> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Post> {
                let mut db = posts::table
                    .find(&id)
                    .first::<PostDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "Post '{}' not found",
                            id
                        )))
                    })?;

                db.apply_update(update);
                db.updated_at = datetime_to_text(Utc::now().naive_utc());

                diesel::update(posts::table.find(&id))
                    .set(&db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(Post::from(db))
            })
            .await
    }

    async fn delete_post(&self, id: &str) -> Result<usize> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(posts::table.find(&id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
