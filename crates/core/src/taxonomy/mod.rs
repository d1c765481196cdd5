//! Taxonomy module - the category tree engine, its models, and traits.
//!
//! Owns the three-level category hierarchy (Main -> Sub -> Brand), derived
//! per-node content counts, and cascade-delete resolution.

mod taxonomy_model;
mod taxonomy_service;
mod taxonomy_traits;
mod taxonomy_tree;

pub use taxonomy_model::{
    Category, CategoryLevel, CategoryNode, ContentRef, DeletePlan, DeleteResolution, NewCategory,
    OrphanedField, OrphanedRef,
};
pub use taxonomy_service::TaxonomyService;
pub use taxonomy_traits::{TaxonomyRepositoryTrait, TaxonomyServiceTrait};
pub use taxonomy_tree::CategoryTree;
