//! Database models for users.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use markops_core::users::{User, UserRole, UserUpdate};

use crate::utils::{datetime_to_text, text_to_datetime};

/// Database model for users
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
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub is_active: i32, // Schema uses Integer
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        User {
            id: db.id,
            display_name: db.display_name,
            email: db.email,
            role: UserRole::from_str_or_default(&db.role),
            is_active: db.is_active != 0,
            created_at: text_to_datetime(&db.created_at),
            updated_at: text_to_datetime(&db.updated_at),
        }
    }
}

impl From<User> for UserDB {
    fn from(user: User) -> Self {
        UserDB {
            id: user.id,
            display_name: user.display_name,
            email: user.email,
            role: user.role.as_str().to_string(),
            is_active: user.is_active as i32,
            created_at: datetime_to_text(user.created_at),
            updated_at: datetime_to_text(user.updated_at),
        }
    }
}

impl UserDB {
    /// Merges a partial update into this row. Timestamps are bumped by the
    /// repository, not here.
    pub fn apply_update(&mut self, update: UserUpdate) {
        if let Some(display_name) = update.display_name {
            self.display_name = display_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(role) = update.role {
            self.role = role.as_str().to_string();
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active as i32;
        }
    }
}
