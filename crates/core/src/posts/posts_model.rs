//! Post domain models (content calendar).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::taxonomy::ContentRef;

/// Lifecycle status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Scheduled => "SCHEDULED",
            PostStatus::Published => "PUBLISHED",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "SCHEDULED" => PostStatus::Scheduled,
            "PUBLISHED" => PostStatus::Published,
            _ => PostStatus::Draft,
        }
    }
}

/// A content-calendar entry. The three taxonomy tag fields reference
/// categories at the corresponding level; none is integrity-enforced and all
/// display paths must tolerate dangling ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: Option<String>,
    pub status: PostStatus,
    pub platform: Option<String>,
    pub scheduled_for: Option<NaiveDateTime>,
    pub main_category_id: Option<String>,
    pub sub_category_id: Option<String>,
    pub brand_type_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Post {
    /// The taxonomy-tagged projection the engine counts over.
    pub fn content_ref(&self) -> ContentRef {
        ContentRef {
            main_category_id: self.main_category_id.clone(),
            sub_category_id: self.sub_category_id.clone(),
            brand_type_id: self.brand_type_id.clone(),
        }
    }
}

/// Data for creating a new post.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub id: Option<String>,
    pub title: String,
    pub body: Option<String>,
    pub status: PostStatus,
    pub platform: Option<String>,
    pub scheduled_for: Option<NaiveDateTime>,
    pub main_category_id: Option<String>,
    pub sub_category_id: Option<String>,
    pub brand_type_id: Option<String>,
}

/// Partial update for a post. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub title: Option<String>,
    pub body: Option<Option<String>>,
    pub status: Option<PostStatus>,
    pub platform: Option<Option<String>>,
    pub scheduled_for: Option<Option<NaiveDateTime>>,
    pub main_category_id: Option<Option<String>>,
    pub sub_category_id: Option<Option<String>>,
    pub brand_type_id: Option<Option<String>>,
}

/// One day of the content calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub posts: Vec<Post>,
}
