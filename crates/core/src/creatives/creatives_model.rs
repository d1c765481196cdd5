//! Creative domain models (production ledger).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetKind {
    #[default]
    Image,
    Video,
    Copy,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Image => "IMAGE",
            AssetKind::Video => "VIDEO",
            AssetKind::Copy => "COPY",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "VIDEO" => AssetKind::Video,
            "COPY" => AssetKind::Copy,
            _ => AssetKind::Image,
        }
    }
}

/// Production pipeline stage. Ordered; `advance` walks it forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreativeStatus {
    #[default]
    Brief,
    InProduction,
    Review,
    Delivered,
}

impl CreativeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreativeStatus::Brief => "BRIEF",
            CreativeStatus::InProduction => "IN_PRODUCTION",
            CreativeStatus::Review => "REVIEW",
            CreativeStatus::Delivered => "DELIVERED",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "IN_PRODUCTION" => CreativeStatus::InProduction,
            "REVIEW" => CreativeStatus::Review,
            "DELIVERED" => CreativeStatus::Delivered,
            _ => CreativeStatus::Brief,
        }
    }

    /// The next pipeline stage; `None` once delivered.
    pub fn next(&self) -> Option<CreativeStatus> {
        match self {
            CreativeStatus::Brief => Some(CreativeStatus::InProduction),
            CreativeStatus::InProduction => Some(CreativeStatus::Review),
            CreativeStatus::Review => Some(CreativeStatus::Delivered),
            CreativeStatus::Delivered => None,
        }
    }
}

/// One creative asset moving through production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creative {
    pub id: String,
    pub title: String,
    pub asset_kind: AssetKind,
    pub status: CreativeStatus,
    pub campaign_id: Option<String>,
    pub assignee_id: Option<String>,
    pub due_on: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data for creating a new creative.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewCreative {
    pub id: Option<String>,
    pub title: String,
    pub asset_kind: AssetKind,
    pub status: CreativeStatus,
    pub campaign_id: Option<String>,
    pub assignee_id: Option<String>,
    pub due_on: Option<NaiveDate>,
}

/// Partial update for a creative. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreativeUpdate {
    pub title: Option<String>,
    pub asset_kind: Option<AssetKind>,
    pub status: Option<CreativeStatus>,
    pub campaign_id: Option<Option<String>>,
    pub assignee_id: Option<Option<String>>,
    pub due_on: Option<Option<NaiveDate>>,
}
