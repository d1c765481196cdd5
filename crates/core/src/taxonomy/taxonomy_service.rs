//! Taxonomy service implementation.
//!
//! Every operation works on a fresh snapshot: fetch, compute with the pure
//! [`CategoryTree`], and for mutations replay the computed plan as a sequence
//! of independent store calls. There is no atomicity across that sequence —
//! if an intermediate call fails the store holds a partially-applied cascade
//! and the caller must re-fetch to reconcile.

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{Error, Result, ValidationError};

use super::{
    Category, CategoryLevel, CategoryNode, CategoryTree, ContentRef, DeletePlan,
    DeleteResolution, NewCategory, OrphanedRef, TaxonomyRepositoryTrait, TaxonomyServiceTrait,
};

pub struct TaxonomyService {
    repository: Arc<dyn TaxonomyRepositoryTrait>,
}

impl TaxonomyService {
    pub fn new(repository: Arc<dyn TaxonomyRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn snapshot(&self) -> Result<CategoryTree> {
        Ok(CategoryTree::new(self.repository.get_categories()?))
    }

    fn validated_name(name: &str) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        Ok(trimmed.to_string())
    }

    /// Recursively assemble display nodes for one sibling group.
    fn build_nodes(
        tree: &CategoryTree,
        entries: &[ContentRef],
        parent: Option<&str>,
    ) -> Vec<CategoryNode> {
        tree.children(parent)
            .into_iter()
            .map(|category| CategoryNode {
                category: category.clone(),
                level: tree.level_of(category),
                branch_count: tree.branch_count(&category.id, entries),
                strict_count: tree.strict_level_count(&category.id, entries),
                children: Self::build_nodes(tree, entries, Some(&category.id)),
            })
            .collect()
    }

    /// Applies a computed plan record by record: reparent the surviving
    /// children first so no surviving row ever points at a deleted parent,
    /// then delete. Each call is independent; a failure here surfaces as-is
    /// and leaves the earlier calls applied.
    async fn apply_plan(&self, plan: &DeletePlan) -> Result<()> {
        for child in &plan.reparented {
            self.repository.upsert_category(child.clone()).await?;
        }
        for id in &plan.deleted_ids {
            self.repository.delete_category_by_id(id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl TaxonomyServiceTrait for TaxonomyService {
    fn get_categories(&self) -> Result<Vec<Category>> {
        self.repository.get_categories()
    }

    fn get_category(&self, id: &str) -> Result<Option<Category>> {
        Ok(self.snapshot()?.get(id).cloned())
    }

    fn get_children(&self, parent_id: Option<&str>) -> Result<Vec<Category>> {
        let tree = self.snapshot()?;
        Ok(tree.children(parent_id).into_iter().cloned().collect())
    }

    fn get_category_tree(&self) -> Result<Vec<CategoryNode>> {
        let tree = self.snapshot()?;
        let entries = self.repository.get_content_refs()?;
        Ok(Self::build_nodes(&tree, &entries, None))
    }

    fn get_branch_count(&self, id: &str) -> Result<usize> {
        let tree = self.snapshot()?;
        let entries = self.repository.get_content_refs()?;
        Ok(tree.branch_count(id, &entries))
    }

    fn get_strict_level_count(&self, id: &str) -> Result<usize> {
        let tree = self.snapshot()?;
        let entries = self.repository.get_content_refs()?;
        Ok(tree.strict_level_count(id, &entries))
    }

    fn get_reassignment_targets(&self, id: &str) -> Result<Vec<Category>> {
        let tree = self.snapshot()?;
        if !tree.contains(id) {
            return Err(Error::NotFound(format!("Category '{}' not found", id)));
        }
        Ok(tree
            .reassignment_targets(id)
            .into_iter()
            .cloned()
            .collect())
    }

    fn get_orphaned_refs(&self) -> Result<Vec<OrphanedRef>> {
        let tree = self.snapshot()?;
        let entries = self.repository.get_content_refs()?;
        let orphans = tree.orphaned_refs(&entries);
        if !orphans.is_empty() {
            warn!(
                "{} dangling taxonomy reference(s) in content entries",
                orphans.len()
            );
        }
        Ok(orphans)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        let name = Self::validated_name(&new_category.name)?;

        let tree = self.snapshot()?;
        if let Some(parent_id) = new_category.parent_id.as_deref() {
            let parent = tree
                .get(parent_id)
                .ok_or_else(|| Error::NotFound(format!("Parent '{}' not found", parent_id)))?;
            if tree.level_of(parent) == CategoryLevel::Brand {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "A brand/type category cannot have children".to_string(),
                )));
            }
        }

        let now = Utc::now().naive_utc();
        let category = Category {
            id: new_category
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name,
            parent_id: new_category.parent_id,
            created_at: now,
            updated_at: now,
        };

        self.repository.upsert_category(category).await
    }

    async fn rename_category(&self, id: &str, name: &str) -> Result<Category> {
        let name = Self::validated_name(name)?;

        let tree = self.snapshot()?;
        let category = tree
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("Category '{}' not found", id)))?;

        let updated = Category {
            name,
            updated_at: Utc::now().naive_utc(),
            ..category.clone()
        };
        self.repository.upsert_category(updated).await
    }

    async fn delete_category(
        &self,
        id: &str,
        resolution: DeleteResolution,
    ) -> Result<DeletePlan> {
        let tree = self.snapshot()?;
        let plan = tree.plan_delete(id, &resolution)?;

        info!(
            "Deleting category '{}': {} deletion(s), {} reparent(s)",
            id,
            plan.deleted_ids.len(),
            plan.reparented.len()
        );

        self.apply_plan(&plan).await?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::RwLock;

    // ============== Mock Repository ==============

    struct MockTaxonomyRepository {
        categories: RwLock<Vec<Category>>,
        entries: Vec<ContentRef>,
    }

    impl MockTaxonomyRepository {
        fn new(categories: Vec<Category>, entries: Vec<ContentRef>) -> Self {
            Self {
                categories: RwLock::new(categories),
                entries,
            }
        }

        fn ids(&self) -> Vec<String> {
            let mut ids: Vec<String> = self
                .categories
                .read()
                .unwrap()
                .iter()
                .map(|c| c.id.clone())
                .collect();
            ids.sort();
            ids
        }

        fn parent_of(&self, id: &str) -> Option<String> {
            self.categories
                .read()
                .unwrap()
                .iter()
                .find(|c| c.id == id)
                .and_then(|c| c.parent_id.clone())
        }
    }

    #[async_trait]
    impl TaxonomyRepositoryTrait for MockTaxonomyRepository {
        fn get_categories(&self) -> Result<Vec<Category>> {
            Ok(self.categories.read().unwrap().clone())
        }

        fn get_content_refs(&self) -> Result<Vec<ContentRef>> {
            Ok(self.entries.clone())
        }

        async fn upsert_category(&self, category: Category) -> Result<Category> {
            let mut categories = self.categories.write().unwrap();
            if let Some(existing) = categories.iter_mut().find(|c| c.id == category.id) {
                *existing = category.clone();
            } else {
                categories.push(category.clone());
            }
            Ok(category)
        }

        async fn delete_category_by_id(&self, id: &str) -> Result<usize> {
            let mut categories = self.categories.write().unwrap();
            let before = categories.len();
            categories.retain(|c| c.id != id);
            Ok(before - categories.len())
        }
    }

    // ============== Fixtures ==============

    fn ts() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn cat(id: &str, name: &str, parent: Option<&str>) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent.map(str::to_string),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn service_with(
        categories: Vec<Category>,
        entries: Vec<ContentRef>,
    ) -> (TaxonomyService, Arc<MockTaxonomyRepository>) {
        let repo = Arc::new(MockTaxonomyRepository::new(categories, entries));
        (TaxonomyService::new(repo.clone()), repo)
    }

    fn sample_categories() -> Vec<Category> {
        vec![
            cat("electronics", "Electronics", None),
            cat("audio", "Audio", Some("electronics")),
            cat("sonos", "Sonos", Some("audio")),
        ]
    }

    // ============== Tests ==============

    #[tokio::test]
    async fn create_rejects_whitespace_only_name() {
        let (service, repo) = service_with(vec![], vec![]);
        let err = service
            .create_category(NewCategory {
                id: None,
                name: "  ".to_string(),
                parent_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(repo.ids().is_empty(), "nothing must be persisted");
    }

    #[tokio::test]
    async fn create_trims_name_and_generates_an_id() {
        let (service, _repo) = service_with(vec![], vec![]);
        let created = service
            .create_category(NewCategory {
                id: None,
                name: "  Paid Social  ".to_string(),
                parent_id: None,
            })
            .await
            .unwrap();
        assert_eq!(created.name, "Paid Social");
        assert!(Uuid::parse_str(&created.id).is_ok());
    }

    #[tokio::test]
    async fn create_under_missing_parent_is_not_found() {
        let (service, _repo) = service_with(sample_categories(), vec![]);
        let err = service
            .create_category(NewCategory {
                id: None,
                name: "Speakers".to_string(),
                parent_id: Some("gone".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn create_under_brand_level_is_rejected() {
        let (service, _repo) = service_with(sample_categories(), vec![]);
        let err = service
            .create_category(NewCategory {
                id: None,
                name: "Too Deep".to_string(),
                parent_id: Some("sonos".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn purge_removes_the_whole_subtree_from_the_store() {
        let (service, repo) = service_with(sample_categories(), vec![]);
        let plan = service
            .delete_category("audio", DeleteResolution::RecursivePurge)
            .await
            .unwrap();
        assert_eq!(plan.deleted_ids.len(), 2);
        assert_eq!(repo.ids(), vec!["electronics".to_string()]);
    }

    #[tokio::test]
    async fn reassign_to_root_promotes_the_child() {
        let (service, repo) = service_with(sample_categories(), vec![]);
        service
            .delete_category("audio", DeleteResolution::ReassignChildren(None))
            .await
            .unwrap();
        assert_eq!(
            repo.ids(),
            vec!["electronics".to_string(), "sonos".to_string()]
        );
        assert_eq!(repo.parent_of("sonos"), None);
    }

    #[tokio::test]
    async fn cycle_error_applies_no_mutation() {
        let (service, repo) = service_with(sample_categories(), vec![]);
        let err = service
            .delete_category(
                "audio",
                DeleteResolution::ReassignChildren(Some("sonos".to_string())),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cycle(_)));
        assert_eq!(repo.ids().len(), 3, "store must be untouched");
        assert_eq!(repo.parent_of("sonos"), Some("audio".to_string()));
    }

    #[tokio::test]
    async fn rename_of_missing_category_is_not_found() {
        let (service, _repo) = service_with(sample_categories(), vec![]);
        let err = service.rename_category("gone", "New Name").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn tree_rolls_up_levels_and_counts() {
        let entries = vec![ContentRef {
            main_category_id: Some("electronics".to_string()),
            sub_category_id: Some("audio".to_string()),
            brand_type_id: Some("sonos".to_string()),
        }];
        let (service, _repo) = service_with(sample_categories(), entries);

        let roots = service.get_category_tree().unwrap();
        assert_eq!(roots.len(), 1);
        let root = &roots[0];
        assert_eq!(root.level, CategoryLevel::Main);
        assert_eq!(root.branch_count, 1);
        assert_eq!(root.strict_count, 0);

        let sub = &root.children[0];
        assert_eq!(sub.level, CategoryLevel::Sub);
        assert_eq!(sub.branch_count, 1);
        assert_eq!(sub.strict_count, 0);

        let brand = &sub.children[0];
        assert_eq!(brand.level, CategoryLevel::Brand);
        assert_eq!(brand.strict_count, 1);
        assert!(brand.children.is_empty());
    }

    #[tokio::test]
    async fn reassignment_targets_for_missing_category_is_not_found() {
        let (service, _repo) = service_with(sample_categories(), vec![]);
        let err = service.get_reassignment_targets("gone").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
