//! Traits for the taxonomy repository and service.

use async_trait::async_trait;

use crate::Result;

use super::{
    Category, CategoryNode, ContentRef, DeletePlan, DeleteResolution, NewCategory, OrphanedRef,
};

/// Repository trait for taxonomy persistence. This is the engine's only
/// collaborator: a generic query layer supplying snapshots and applying
/// single-record mutations. There is no multi-record transactional surface
/// on purpose (see the cascade-replay notes on the service).
#[async_trait]
pub trait TaxonomyRepositoryTrait: Send + Sync {
    fn get_categories(&self) -> Result<Vec<Category>>;

    /// The taxonomy-tagged projection of every content entry.
    fn get_content_refs(&self) -> Result<Vec<ContentRef>>;

    /// Insert-or-replace by id.
    async fn upsert_category(&self, category: Category) -> Result<Category>;

    async fn delete_category_by_id(&self, id: &str) -> Result<usize>;
}

/// Service trait for taxonomy business logic.
#[async_trait]
pub trait TaxonomyServiceTrait: Send + Sync {
    fn get_categories(&self) -> Result<Vec<Category>>;
    fn get_category(&self, id: &str) -> Result<Option<Category>>;

    /// Direct children of `parent_id` (roots when `None`), name-ordered.
    fn get_children(&self, parent_id: Option<&str>) -> Result<Vec<Category>>;

    /// The full forest with derived levels and per-node content counts.
    fn get_category_tree(&self) -> Result<Vec<CategoryNode>>;

    /// Entries tagged anywhere in the category's subtree tagging.
    fn get_branch_count(&self, id: &str) -> Result<usize>;

    /// Entries whose deepest tag is exactly this category.
    fn get_strict_level_count(&self, id: &str) -> Result<usize>;

    /// Valid `ReassignChildren` targets for deleting `id`.
    fn get_reassignment_targets(&self, id: &str) -> Result<Vec<Category>>;

    /// Content references pointing at ids no longer in the snapshot.
    fn get_orphaned_refs(&self) -> Result<Vec<OrphanedRef>>;

    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn rename_category(&self, id: &str, name: &str) -> Result<Category>;

    /// Plans and applies a delete under the given resolution. Returns the
    /// applied plan so callers can refresh their views.
    async fn delete_category(
        &self,
        id: &str,
        resolution: DeleteResolution,
    ) -> Result<DeletePlan>;
}
