//! Domain models for the category taxonomy.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A taxonomy category. Hierarchical via `parent_id`: a root category is a
/// Main Category, its children are Sub Categories, and their children are
/// Brands/Types. Depth beyond three levels is never created by this crate
/// but the classifier tolerates malformed data (see [`CategoryLevel`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data for creating a new category.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    pub name: String,
    pub parent_id: Option<String>,
}

/// Derived level of a category within the three-level tree.
///
/// Never stored; always recomputed from parent links so the classification
/// cannot drift from the actual tree shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryLevel {
    Main,
    Sub,
    Brand,
}

/// The taxonomy-tagged projection of a content entry (a post, in this app).
///
/// Each field references a category id at the corresponding level. References
/// are not integrity-enforced: a field may point at a category that no longer
/// exists, and all consumers must degrade to "absent" rather than fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRef {
    pub main_category_id: Option<String>,
    pub sub_category_id: Option<String>,
    pub brand_type_id: Option<String>,
}

impl ContentRef {
    /// Hosted-store exports carry both NULL and "" for unset tags.
    pub(crate) fn field_is(field: &Option<String>, id: &str) -> bool {
        field.as_deref() == Some(id)
    }

    pub(crate) fn field_is_empty(field: &Option<String>) -> bool {
        match field.as_deref() {
            None | Some("") => true,
            Some(_) => false,
        }
    }
}

/// Caller-selected strategy for deleting a category that has children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "newParentId")]
pub enum DeleteResolution {
    /// Delete the category and its entire descendant subtree.
    RecursivePurge,
    /// Rewrite each direct child's parent to the given category
    /// (`None` promotes them to root), then delete only this category.
    ReassignChildren(Option<String>),
    /// Delete only this category. Valid only when it has no children.
    SimpleDelete,
}

/// The computed mutation list for a delete operation.
///
/// The service replays this as a sequence of independent store calls: one
/// upsert per reparented child, then one delete per id. Content entries
/// referencing deleted ids are intentionally NOT part of the plan — dangling
/// tags are tolerated everywhere and reported via the orphan report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePlan {
    pub deleted_ids: Vec<String>,
    pub reparented: Vec<Category>,
}

/// A content reference pointing at a category id absent from the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedRef {
    pub category_id: String,
    /// Which tag field carried the dangling id.
    pub field: OrphanedField,
    /// How many content entries carry this dangling reference in this field.
    pub entry_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrphanedField {
    MainCategory,
    SubCategory,
    BrandType,
}

/// A category with derived level and content counts, nested for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub level: CategoryLevel,
    /// Entries tagged anywhere in this node's subtree, including the node.
    pub branch_count: usize,
    /// Entries whose deepest tag is exactly this node.
    pub strict_count: usize,
    pub children: Vec<CategoryNode>,
}
