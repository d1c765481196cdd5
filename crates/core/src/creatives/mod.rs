//! Creatives module - the creative-production ledger.

mod creatives_model;
mod creatives_service;
mod creatives_traits;

pub use creatives_model::{AssetKind, Creative, CreativeStatus, CreativeUpdate, NewCreative};
pub use creatives_service::CreativeService;
pub use creatives_traits::{CreativeRepositoryTrait, CreativeServiceTrait};
