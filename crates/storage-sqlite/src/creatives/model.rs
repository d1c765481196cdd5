//! Database models for creatives.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use markops_core::creatives::{AssetKind, Creative, CreativeStatus, CreativeUpdate};

use crate::utils::{date_to_text, datetime_to_text, text_to_date, text_to_datetime};

/// Database model for creatives
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
#[diesel(table_name = crate::schema::creatives)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CreativeDB {
    pub id: String,
    pub title: String,
    pub asset_kind: String,
    pub status: String,
    pub campaign_id: Option<String>,
    pub assignee_id: Option<String>,
    pub due_on: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CreativeDB> for Creative {
    fn from(db: CreativeDB) -> Self {
        Creative {
            id: db.id,
            title: db.title,
            asset_kind: AssetKind::from_str_or_default(&db.asset_kind),
            status: CreativeStatus::from_str_or_default(&db.status),
            campaign_id: db.campaign_id,
            assignee_id: db.assignee_id,
            due_on: db.due_on.as_deref().map(text_to_date),
            created_at: text_to_datetime(&db.created_at),
            updated_at: text_to_datetime(&db.updated_at),
        }
    }
}

impl From<Creative> for CreativeDB {
    fn from(creative: Creative) -> Self {
        CreativeDB {
            id: creative.id,
            title: creative.title,
            asset_kind: creative.asset_kind.as_str().to_string(),
            status: creative.status.as_str().to_string(),
            campaign_id: creative.campaign_id,
            assignee_id: creative.assignee_id,
            due_on: creative.due_on.map(date_to_text),
            created_at: datetime_to_text(creative.created_at),
            updated_at: datetime_to_text(creative.updated_at),
        }
    }
}

impl CreativeDB {
    /// Merges a partial update into this row. Timestamps are bumped by the
    /// repository, not here.
    pub fn apply_update(&mut self, update: CreativeUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(asset_kind) = update.asset_kind {
            self.asset_kind = asset_kind.as_str().to_string();
        }
        if let Some(status) = update.status {
            self.status = status.as_str().to_string();
        }
        if let Some(campaign_id) = update.campaign_id {
            self.campaign_id = campaign_id;
        }
        if let Some(assignee_id) = update.assignee_id {
            self.assignee_id = assignee_id;
        }
        if let Some(due_on) = update.due_on {
            self.due_on = due_on.map(date_to_text);
        }
    }
}
