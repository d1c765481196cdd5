//! SQLite storage for campaigns.

pub mod model;
pub mod repository;

pub use model::CampaignDB;
pub use repository::CampaignRepository;
