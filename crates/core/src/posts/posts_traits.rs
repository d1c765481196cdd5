//! Traits for post repository and service.

use async_trait::async_trait;

use crate::Result;

use super::{CalendarDay, NewPost, Post, PostUpdate};

/// Repository trait for post persistence.
#[async_trait]
pub trait PostRepositoryTrait: Send + Sync {
    fn get_posts(&self) -> Result<Vec<Post>>;
    fn get_post(&self, id: &str) -> Result<Option<Post>>;
    async fn create_post(&self, new_post: NewPost) -> Result<Post>;
    async fn update_post(&self, id: &str, update: PostUpdate) -> Result<Post>;
    async fn delete_post(&self, id: &str) -> Result<usize>;
}

/// Service trait for post business logic.
#[async_trait]
pub trait PostServiceTrait: Send + Sync {
    fn get_posts(&self) -> Result<Vec<Post>>;
    fn get_post(&self, id: &str) -> Result<Post>;

    /// Posts tagged anywhere with the given category id (branch semantics).
    fn get_posts_for_category(&self, category_id: &str) -> Result<Vec<Post>>;

    /// Scheduled posts of one month grouped by day, days ascending.
    fn get_calendar(&self, year: i32, month: u32) -> Result<Vec<CalendarDay>>;

    async fn create_post(&self, new_post: NewPost) -> Result<Post>;
    async fn update_post(&self, id: &str, update: PostUpdate) -> Result<Post>;
    async fn delete_post(&self, id: &str) -> Result<usize>;
}
