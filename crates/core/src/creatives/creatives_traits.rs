//! Traits for creative repository and service.

use async_trait::async_trait;

use crate::Result;

use super::{Creative, CreativeUpdate, NewCreative};

/// Repository trait for creative persistence.
#[async_trait]
pub trait CreativeRepositoryTrait: Send + Sync {
    fn get_creatives(&self) -> Result<Vec<Creative>>;
    fn get_creative(&self, id: &str) -> Result<Option<Creative>>;

    /// Number of creatives assigned to the given user.
    fn count_by_assignee(&self, assignee_id: &str) -> Result<usize>;

    async fn create_creative(&self, new_creative: NewCreative) -> Result<Creative>;
    async fn update_creative(&self, id: &str, update: CreativeUpdate) -> Result<Creative>;
    async fn delete_creative(&self, id: &str) -> Result<usize>;
}

/// Service trait for creative business logic.
#[async_trait]
pub trait CreativeServiceTrait: Send + Sync {
    fn get_creatives(&self) -> Result<Vec<Creative>>;
    fn get_creative(&self, id: &str) -> Result<Creative>;

    /// Undelivered creatives, due-date ascending, undated last.
    fn get_backlog(&self) -> Result<Vec<Creative>>;

    async fn create_creative(&self, new_creative: NewCreative) -> Result<Creative>;
    async fn update_creative(&self, id: &str, update: CreativeUpdate) -> Result<Creative>;

    /// Moves the creative one stage forward in the pipeline.
    async fn advance_status(&self, id: &str) -> Result<Creative>;

    async fn delete_creative(&self, id: &str) -> Result<usize>;
}
