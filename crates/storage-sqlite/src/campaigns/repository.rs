//! Repository implementation for campaigns.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use markops_core::campaigns::{Campaign, CampaignRepositoryTrait, CampaignUpdate, NewCampaign};
use markops_core::errors::{DatabaseError, Error};
use markops_core::Result;

use super::model::CampaignDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::campaigns;
use crate::utils::{date_to_text, datetime_to_text, decimal_to_text};

pub struct CampaignRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CampaignRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CampaignRepositoryTrait for CampaignRepository {
    fn get_campaigns(&self) -> Result<Vec<Campaign>> {
        let mut conn = get_connection(&self.pool)?;
        let results = campaigns::table
            .order(campaigns::starts_on.desc())
            .load::<CampaignDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(Campaign::from).collect())
    }

    fn get_campaign(&self, id: &str) -> Result<Option<Campaign>> {
        let mut conn = get_connection(&self.pool)?;
        let result = campaigns::table
            .find(id)
            .first::<CampaignDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(Campaign::from))
    }

    async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Campaign> {
                let now = datetime_to_text(Utc::now().naive_utc());
                let db = CampaignDB {
                    id: new_campaign
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: new_campaign.name,
                    platform: new_campaign.platform,
                    objective: new_campaign.objective,
                    status: new_campaign.status.as_str().to_string(),
                    budget: decimal_to_text(new_campaign.budget),
                    spent: decimal_to_text(new_campaign.spent),
                    starts_on: date_to_text(new_campaign.starts_on),
                    ends_on: new_campaign.ends_on.map(date_to_text),
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(campaigns::table)
                    .values(&db)
                    .returning(CampaignDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(Campaign::from(result))
            })
            .await
    }

    async fn update_campaign(&self, id: &str, update: CampaignUpdate) -> Result<Campaign> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Campaign> {
                let mut db = campaigns::table
                    .find(&id)
                    .first::<CampaignDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "Campaign '{}' not found",
                            id
                        )))
                    })?;

                db.apply_update(update);
                db.updated_at = datetime_to_text(Utc::now().naive_utc());

                diesel::update(campaigns::table.find(&id))
                    .set(&db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(Campaign::from(db))
            })
            .await
    }

    async fn delete_campaign(&self, id: &str) -> Result<usize> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(campaigns::table.find(&id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
