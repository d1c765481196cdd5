//! Campaign domain models (ad-campaign tracker).

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    #[default]
    Planned,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Planned => "PLANNED",
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Paused => "PAUSED",
            CampaignStatus::Completed => "COMPLETED",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "ACTIVE" => CampaignStatus::Active,
            "PAUSED" => CampaignStatus::Paused,
            "COMPLETED" => CampaignStatus::Completed,
            _ => CampaignStatus::Planned,
        }
    }
}

/// An ad campaign with its budget ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub platform: String,
    pub objective: Option<String>,
    pub status: CampaignStatus,
    pub budget: Decimal,
    pub spent: Decimal,
    pub starts_on: NaiveDate,
    pub ends_on: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Campaign {
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }
}

/// Data for creating a new campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub id: Option<String>,
    pub name: String,
    pub platform: String,
    pub objective: Option<String>,
    pub status: CampaignStatus,
    pub budget: Decimal,
    pub spent: Decimal,
    pub starts_on: NaiveDate,
    pub ends_on: Option<NaiveDate>,
}

/// Partial update for a campaign. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CampaignUpdate {
    pub name: Option<String>,
    pub platform: Option<String>,
    pub objective: Option<Option<String>>,
    pub status: Option<CampaignStatus>,
    pub budget: Option<Decimal>,
    pub spent: Option<Decimal>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<Option<NaiveDate>>,
}

/// Dashboard aggregation over all campaigns (computed client-side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub active_count: usize,
    pub over_budget_ids: Vec<String>,
}
