//! User domain models.
//!
//! Authentication and sessions live outside this codebase; users here are
//! dashboard members referenced by creatives and audit fields.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    #[default]
    Editor,
    Viewer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Editor => "EDITOR",
            UserRole::Viewer => "VIEWER",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "ADMIN" => UserRole::Admin,
            "VIEWER" => UserRole::Viewer,
            _ => UserRole::Editor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id: Option<String>,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
}

/// Partial update for a user. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Outcome of removing a user: referenced users are deactivated instead of
/// hard-deleted so creative assignments keep resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRemoval {
    Deleted,
    Deactivated,
}
