//! Database models for campaigns.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use markops_core::campaigns::{Campaign, CampaignStatus, CampaignUpdate};

use crate::utils::{
    date_to_text, datetime_to_text, decimal_to_text, text_to_date, text_to_datetime,
    text_to_decimal,
};

/// Database model for campaigns
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
#[diesel(table_name = crate::schema::campaigns)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CampaignDB {
    pub id: String,
    pub name: String,
    pub platform: String,
    pub objective: Option<String>,
    pub status: String,
    pub budget: String, // Schema uses Text
    pub spent: String,  // Schema uses Text
    pub starts_on: String,
    pub ends_on: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CampaignDB> for Campaign {
    fn from(db: CampaignDB) -> Self {
        Campaign {
            id: db.id,
            name: db.name,
            platform: db.platform,
            objective: db.objective,
            status: CampaignStatus::from_str_or_default(&db.status),
            budget: text_to_decimal(&db.budget),
            spent: text_to_decimal(&db.spent),
            starts_on: text_to_date(&db.starts_on),
            ends_on: db.ends_on.as_deref().map(text_to_date),
            created_at: text_to_datetime(&db.created_at),
            updated_at: text_to_datetime(&db.updated_at),
        }
    }
}

impl From<Campaign> for CampaignDB {
    fn from(campaign: Campaign) -> Self {
        CampaignDB {
            id: campaign.id,
            name: campaign.name,
            platform: campaign.platform,
            objective: campaign.objective,
            status: campaign.status.as_str().to_string(),
            budget: decimal_to_text(campaign.budget),
            spent: decimal_to_text(campaign.spent),
            starts_on: date_to_text(campaign.starts_on),
            ends_on: campaign.ends_on.map(date_to_text),
            created_at: datetime_to_text(campaign.created_at),
            updated_at: datetime_to_text(campaign.updated_at),
        }
    }
}

impl CampaignDB {
    /// Merges a partial update into this row. Timestamps are bumped by the
    /// repository, not here.
    pub fn apply_update(&mut self, update: CampaignUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(platform) = update.platform {
            self.platform = platform;
        }
        if let Some(objective) = update.objective {
            self.objective = objective;
        }
        if let Some(status) = update.status {
            self.status = status.as_str().to_string();
        }
        if let Some(budget) = update.budget {
            self.budget = decimal_to_text(budget);
        }
        if let Some(spent) = update.spent {
            self.spent = decimal_to_text(spent);
        }
        if let Some(starts_on) = update.starts_on {
            self.starts_on = date_to_text(starts_on);
        }
        if let Some(ends_on) = update.ends_on {
            self.ends_on = ends_on.map(date_to_text);
        }
    }
}
