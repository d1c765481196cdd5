//! Traits for user repository and service.

use async_trait::async_trait;

use crate::Result;

use super::{NewUser, User, UserRemoval, UserUpdate};

/// Repository trait for user persistence.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_users(&self) -> Result<Vec<User>>;
    fn get_user(&self, id: &str) -> Result<Option<User>>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User>;
    async fn delete_user(&self, id: &str) -> Result<usize>;
}

/// Service trait for user business logic.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_users(&self) -> Result<Vec<User>>;
    fn get_user(&self, id: &str) -> Result<User>;
    fn get_active_users(&self) -> Result<Vec<User>>;

    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User>;

    /// Hard-deletes when nothing references the user, deactivates otherwise.
    async fn remove_user(&self, id: &str) -> Result<UserRemoval>;
}
