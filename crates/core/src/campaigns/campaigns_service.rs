//! Campaign service implementation.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::errors::{Error, Result, ValidationError};

use super::{
    Campaign, CampaignRepositoryTrait, CampaignServiceTrait, CampaignStatus, CampaignSummary,
    CampaignUpdate, NewCampaign,
};

pub struct CampaignService {
    repository: Arc<dyn CampaignRepositoryTrait>,
}

impl CampaignService {
    pub fn new(repository: Arc<dyn CampaignRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn validate(name: &str, budget: Decimal, spent: Decimal) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if budget < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Budget cannot be negative".to_string(),
            )));
        }
        if spent < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Spend cannot be negative".to_string(),
            )));
        }
        Ok(trimmed.to_string())
    }
}

#[async_trait]
impl CampaignServiceTrait for CampaignService {
    fn get_campaigns(&self) -> Result<Vec<Campaign>> {
        self.repository.get_campaigns()
    }

    fn get_campaign(&self, id: &str) -> Result<Campaign> {
        self.repository
            .get_campaign(id)?
            .ok_or_else(|| Error::NotFound(format!("Campaign '{}' not found", id)))
    }

    fn get_summary(&self) -> Result<CampaignSummary> {
        let campaigns = self.repository.get_campaigns()?;

        let mut summary = CampaignSummary {
            total_budget: Decimal::ZERO,
            total_spent: Decimal::ZERO,
            active_count: 0,
            over_budget_ids: Vec::new(),
        };
        for campaign in &campaigns {
            summary.total_budget += campaign.budget;
            summary.total_spent += campaign.spent;
            if campaign.status == CampaignStatus::Active {
                summary.active_count += 1;
            }
            if campaign.is_over_budget() {
                summary.over_budget_ids.push(campaign.id.clone());
            }
        }
        summary.over_budget_ids.sort();
        Ok(summary)
    }

    async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign> {
        let name = Self::validate(&new_campaign.name, new_campaign.budget, new_campaign.spent)?;
        self.repository
            .create_campaign(NewCampaign {
                name,
                ..new_campaign
            })
            .await
    }

    async fn update_campaign(&self, id: &str, update: CampaignUpdate) -> Result<Campaign> {
        let current = self.get_campaign(id)?;
        let name = update.name.as_deref().unwrap_or(&current.name);
        let budget = update.budget.unwrap_or(current.budget);
        let spent = update.spent.unwrap_or(current.spent);
        let name = Self::validate(name, budget, spent)?;

        self.repository
            .update_campaign(
                id,
                CampaignUpdate {
                    name: Some(name),
                    ..update
                },
            )
            .await
    }

    async fn delete_campaign(&self, id: &str) -> Result<usize> {
        self.repository.delete_campaign(id).await
    }
}
