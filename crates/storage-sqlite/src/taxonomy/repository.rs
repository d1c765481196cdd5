//! Repository implementation for taxonomy categories.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use markops_core::taxonomy::{Category, ContentRef, TaxonomyRepositoryTrait};
use markops_core::Result;

use super::model::CategoryDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{categories, posts};
use crate::utils::datetime_to_text;

pub struct TaxonomyRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TaxonomyRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TaxonomyRepositoryTrait for TaxonomyRepository {
    fn get_categories(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let results = categories::table
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(Category::from).collect())
    }

    fn get_content_refs(&self) -> Result<Vec<ContentRef>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = posts::table
            .select((
                posts::main_category_id,
                posts::sub_category_id,
                posts::brand_type_id,
            ))
            .load::<(Option<String>, Option<String>, Option<String>)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(
                |(main_category_id, sub_category_id, brand_type_id)| ContentRef {
                    main_category_id,
                    sub_category_id,
                    brand_type_id,
                },
            )
            .collect())
    }

    async fn upsert_category(&self, category: Category) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let mut db: CategoryDB = category.into();
                db.updated_at = datetime_to_text(Utc::now().naive_utc());

                let result = diesel::insert_into(categories::table)
                    .values(&db)
                    .on_conflict(categories::id)
                    .do_update()
                    .set((
                        categories::name.eq(&db.name),
                        categories::parent_id.eq(&db.parent_id),
                        categories::updated_at.eq(&db.updated_at),
                    ))
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(Category::from(result))
            })
            .await
    }

    async fn delete_category_by_id(&self, id: &str) -> Result<usize> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(categories::table.find(&id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
