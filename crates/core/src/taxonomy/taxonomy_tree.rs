//! The taxonomy engine: pure computations over a snapshot of categories.
//!
//! The hierarchy is modeled as a flat arena (id -> category with a nullable
//! parent pointer) plus on-demand traversals, never as nested child lists.
//! Every operation works on an immutable snapshot fetched from the store at
//! the start of an interaction; mutations are expressed as a [`DeletePlan`]
//! the caller replays against the store record by record.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::errors::{Error, Result, ValidationError};

use super::taxonomy_model::{
    Category, CategoryLevel, ContentRef, DeletePlan, DeleteResolution, OrphanedField, OrphanedRef,
};

/// Arena-style snapshot of the category forest.
pub struct CategoryTree {
    nodes: HashMap<String, Category>,
}

impl CategoryTree {
    pub fn new(categories: Vec<Category>) -> Self {
        let nodes = categories.into_iter().map(|c| (c.id.clone(), c)).collect();
        Self { nodes }
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Derives the level of a category from its parent chain.
    ///
    /// A dangling `parent_id` (pointing at a missing node) classifies as
    /// Main: with no parent resolvable the node is treated best-effort as a
    /// root. This is the single derivation point; callers must not re-derive
    /// the three-way test themselves.
    pub fn level_of(&self, category: &Category) -> CategoryLevel {
        match category.parent_id.as_deref() {
            None => CategoryLevel::Main,
            Some(pid) => match self.nodes.get(pid) {
                None => CategoryLevel::Main,
                Some(parent) if parent.parent_id.is_none() => CategoryLevel::Sub,
                Some(_) => CategoryLevel::Brand,
            },
        }
    }

    /// Total entries tagged anywhere with this category id, regardless of
    /// which tag field carries it. Zero when nothing matches, including for
    /// ids absent from the snapshot.
    pub fn branch_count(&self, id: &str, entries: &[ContentRef]) -> usize {
        entries
            .iter()
            .filter(|e| {
                ContentRef::field_is(&e.main_category_id, id)
                    || ContentRef::field_is(&e.sub_category_id, id)
                    || ContentRef::field_is(&e.brand_type_id, id)
            })
            .count()
    }

    /// Entries whose deepest tag is exactly this category.
    ///
    /// Distinguishes "this node is the deepest tag" from "something beneath
    /// this node is tagged", so an entry never appears under two different
    /// strict-level views. Never errors: an id missing from the snapshot
    /// counts zero.
    pub fn strict_level_count(&self, id: &str, entries: &[ContentRef]) -> usize {
        let Some(category) = self.nodes.get(id) else {
            return 0;
        };
        match self.level_of(category) {
            CategoryLevel::Brand => entries
                .iter()
                .filter(|e| ContentRef::field_is(&e.brand_type_id, id))
                .count(),
            CategoryLevel::Sub => entries
                .iter()
                .filter(|e| {
                    ContentRef::field_is(&e.sub_category_id, id)
                        && ContentRef::field_is_empty(&e.brand_type_id)
                })
                .count(),
            CategoryLevel::Main => entries
                .iter()
                .filter(|e| {
                    ContentRef::field_is(&e.main_category_id, id)
                        && ContentRef::field_is_empty(&e.sub_category_id)
                })
                .count(),
        }
    }

    /// Direct children of `parent` (roots when `parent` is `None`), ordered
    /// by name, case-insensitive. Insertion order is irrelevant.
    pub fn children(&self, parent: Option<&str>) -> Vec<&Category> {
        let mut result: Vec<&Category> = self
            .nodes
            .values()
            .filter(|c| c.parent_id.as_deref() == parent)
            .collect();
        result.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        result
    }

    /// Transitive descendants of `id` (excluding `id` itself), depth-first.
    ///
    /// A visited set guards the traversal so a corrupted snapshot containing
    /// a parent cycle terminates instead of looping.
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let mut result = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(id);
        let mut stack: Vec<&str> = self.child_ids(id);

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            result.push(current.to_string());
            stack.extend(self.child_ids(current));
        }
        result
    }

    fn child_ids(&self, parent: &str) -> Vec<&str> {
        self.nodes
            .values()
            .filter(|c| c.parent_id.as_deref() == Some(parent))
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Computes the mutation list for deleting a category.
    ///
    /// The plan is all-or-nothing from the engine's perspective: any error
    /// means nothing may be applied. The engine never emits a plan that
    /// leaves a surviving category with a dangling parent pointer.
    pub fn plan_delete(&self, id: &str, resolution: &DeleteResolution) -> Result<DeletePlan> {
        if !self.contains(id) {
            return Err(Error::NotFound(format!("Category '{}' not found", id)));
        }

        match resolution {
            DeleteResolution::RecursivePurge => {
                let mut deleted_ids = vec![id.to_string()];
                deleted_ids.extend(self.descendants(id));
                Ok(DeletePlan {
                    deleted_ids,
                    reparented: Vec::new(),
                })
            }
            DeleteResolution::ReassignChildren(new_parent_id) => {
                if let Some(target) = new_parent_id.as_deref() {
                    if target == id {
                        return Err(Error::Cycle(format!(
                            "Cannot reassign children of '{}' to itself",
                            id
                        )));
                    }
                    if !self.contains(target) {
                        return Err(Error::NotFound(format!(
                            "Reassignment target '{}' not found",
                            target
                        )));
                    }
                    if self.descendants(id).iter().any(|d| d == target) {
                        return Err(Error::Cycle(format!(
                            "Reassignment target '{}' is a descendant of '{}'",
                            target, id
                        )));
                    }
                }

                // Only direct children move; grandchildren keep following
                // their own (now reparented) parent.
                let reparented = self
                    .children(Some(id))
                    .into_iter()
                    .map(|child| Category {
                        parent_id: new_parent_id.clone(),
                        ..child.clone()
                    })
                    .collect();

                Ok(DeletePlan {
                    deleted_ids: vec![id.to_string()],
                    reparented,
                })
            }
            DeleteResolution::SimpleDelete => {
                if !self.children(Some(id)).is_empty() {
                    return Err(Error::Validation(ValidationError::InvalidInput(format!(
                        "Category '{}' has children; choose a cascade resolution",
                        id
                    ))));
                }
                Ok(DeletePlan {
                    deleted_ids: vec![id.to_string()],
                    reparented: Vec::new(),
                })
            }
        }
    }

    /// Categories eligible as `ReassignChildren` targets for deleting `id`:
    /// Main- or Sub-level only (a Brand is the deepest level and cannot
    /// parent anything), excluding `id` itself and every descendant of `id`
    /// so no returned entry can create a cycle. Name-ordered.
    pub fn reassignment_targets(&self, id: &str) -> Vec<&Category> {
        let excluded: HashSet<String> = self.descendants(id).into_iter().collect();
        let mut result: Vec<&Category> = self
            .nodes
            .values()
            .filter(|c| c.id != id && !excluded.contains(&c.id))
            .filter(|c| self.level_of(c) != CategoryLevel::Brand)
            .collect();
        result.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        result
    }

    /// Reports content references pointing at ids absent from this snapshot.
    ///
    /// Cascade purges leave content tags dangling on purpose; this surfaces
    /// them instead of letting every display path rediscover them. Aggregated
    /// per (id, field), deterministically ordered.
    pub fn orphaned_refs(&self, entries: &[ContentRef]) -> Vec<OrphanedRef> {
        let mut counts: BTreeMap<(String, OrphanedField), usize> = BTreeMap::new();

        let mut record = |field: &Option<String>, kind: OrphanedField| {
            if let Some(id) = field.as_deref() {
                if !id.is_empty() && !self.contains(id) {
                    *counts.entry((id.to_string(), kind)).or_insert(0) += 1;
                }
            }
        };

        for entry in entries {
            record(&entry.main_category_id, OrphanedField::MainCategory);
            record(&entry.sub_category_id, OrphanedField::SubCategory);
            record(&entry.brand_type_id, OrphanedField::BrandType);
        }

        counts
            .into_iter()
            .map(|((category_id, field), entry_count)| OrphanedRef {
                category_id,
                field,
                entry_count,
            })
            .collect()
    }
}

impl OrphanedField {
    /// Stable ordering key for the orphan report.
    fn rank(&self) -> u8 {
        match self {
            OrphanedField::MainCategory => 0,
            OrphanedField::SubCategory => 1,
            OrphanedField::BrandType => 2,
        }
    }
}

impl Ord for OrphanedField {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for OrphanedField {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
