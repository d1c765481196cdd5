//! Database models for posts.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use markops_core::posts::{Post, PostStatus, PostUpdate};

use crate::utils::{datetime_to_text, text_to_datetime};

/// Database model for posts
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
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PostDB {
    pub id: String,
    pub title: String,
    pub body: Option<String>,
    pub status: String,
    pub platform: Option<String>,
    pub scheduled_for: Option<String>,
    pub main_category_id: Option<String>,
    pub sub_category_id: Option<String>,
    pub brand_type_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PostDB> for Post {
    fn from(db: PostDB) -> Self {
        Post {
            id: db.id,
            title: db.title,
            body: db.body,
            status: PostStatus::from_str_or_default(&db.status),
            platform: db.platform,
            scheduled_for: db.scheduled_for.as_deref().map(text_to_datetime),
            main_category_id: db.main_category_id,
            sub_category_id: db.sub_category_id,
            brand_type_id: db.brand_type_id,
            created_at: text_to_datetime(&db.created_at),
            updated_at: text_to_datetime(&db.updated_at),
        }
    }
}

impl From<Post> for PostDB {
    fn from(post: Post) -> Self {
        PostDB {
            id: post.id,
            title: post.title,
            body: post.body,
            status: post.status.as_str().to_string(),
            platform: post.platform,
            scheduled_for: post.scheduled_for.map(datetime_to_text),
            main_category_id: post.main_category_id,
            sub_category_id: post.sub_category_id,
            brand_type_id: post.brand_type_id,
            created_at: datetime_to_text(post.created_at),
            updated_at: datetime_to_text(post.updated_at),
        }
    }
}

impl PostDB {
    /// Merges a partial update into this row. Timestamps are bumped by the
    /// repository, not here.
    pub fn apply_update(&mut self, update: PostUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
        if let Some(status) = update.status {
            self.status = status.as_str().to_string();
        }
        if let Some(platform) = update.platform {
            self.platform = platform;
        }
        if let Some(scheduled_for) = update.scheduled_for {
            self.scheduled_for = scheduled_for.map(datetime_to_text);
        }
        if let Some(main_category_id) = update.main_category_id {
            self.main_category_id = main_category_id;
        }
        if let Some(sub_category_id) = update.sub_category_id {
            self.sub_category_id = sub_category_id;
        }
        if let Some(brand_type_id) = update.brand_type_id {
            self.brand_type_id = brand_type_id;
        }
    }
}
