//! Traits for campaign repository and service.

use async_trait::async_trait;

use crate::Result;

use super::{Campaign, CampaignSummary, CampaignUpdate, NewCampaign};

/// Repository trait for campaign persistence.
#[async_trait]
pub trait CampaignRepositoryTrait: Send + Sync {
    fn get_campaigns(&self) -> Result<Vec<Campaign>>;
    fn get_campaign(&self, id: &str) -> Result<Option<Campaign>>;
    async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign>;
    async fn update_campaign(&self, id: &str, update: CampaignUpdate) -> Result<Campaign>;
    async fn delete_campaign(&self, id: &str) -> Result<usize>;
}

/// Service trait for campaign business logic.
#[async_trait]
pub trait CampaignServiceTrait: Send + Sync {
    fn get_campaigns(&self) -> Result<Vec<Campaign>>;
    fn get_campaign(&self, id: &str) -> Result<Campaign>;

    /// Roll-up of budget, spend, and over-budget campaigns for the dashboard.
    fn get_summary(&self) -> Result<CampaignSummary>;

    async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign>;
    async fn update_campaign(&self, id: &str, update: CampaignUpdate) -> Result<Campaign>;
    async fn delete_campaign(&self, id: &str) -> Result<usize>;
}
