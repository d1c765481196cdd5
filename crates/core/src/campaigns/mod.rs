//! Campaigns module - the ad-campaign tracker.

mod campaigns_model;
mod campaigns_service;
mod campaigns_traits;

pub use campaigns_model::{
    Campaign, CampaignStatus, CampaignSummary, CampaignUpdate, NewCampaign,
};
pub use campaigns_service::CampaignService;
pub use campaigns_traits::{CampaignRepositoryTrait, CampaignServiceTrait};
