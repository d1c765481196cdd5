//! Database models for taxonomy categories.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use markops_core::taxonomy::Category;

use crate::utils::{datetime_to_text, text_to_datetime};

/// Database model for categories
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    Insertable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub created_at: String, // Schema uses Text
    pub updated_at: String, // Schema uses Text
}

impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Category {
            id: db.id,
            name: db.name,
            parent_id: db.parent_id,
            created_at: text_to_datetime(&db.created_at),
            updated_at: text_to_datetime(&db.updated_at),
        }
    }
}

impl From<Category> for CategoryDB {
    fn from(category: Category) -> Self {
        CategoryDB {
            id: category.id,
            name: category.name,
            parent_id: category.parent_id,
            created_at: datetime_to_text(category.created_at),
            updated_at: datetime_to_text(category.updated_at),
        }
    }
}
