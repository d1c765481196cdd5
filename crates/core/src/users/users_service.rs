//! User service implementation.

use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::creatives::CreativeRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};

use super::{NewUser, User, UserRemoval, UserRepositoryTrait, UserServiceTrait, UserUpdate};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    creative_repository: Arc<dyn CreativeRepositoryTrait>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        creative_repository: Arc<dyn CreativeRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            creative_repository,
        }
    }

    fn validated_name(name: &str) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "displayName".to_string(),
            )));
        }
        Ok(trimmed.to_string())
    }

    fn validated_email(email: &str) -> Result<String> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "email".to_string(),
            )));
        }
        if !trimmed.contains('@') {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid email address: {}",
                trimmed
            ))));
        }
        Ok(trimmed.to_string())
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_users(&self) -> Result<Vec<User>> {
        self.repository.get_users()
    }

    fn get_user(&self, id: &str) -> Result<User> {
        self.repository
            .get_user(id)?
            .ok_or_else(|| Error::NotFound(format!("User '{}' not found", id)))
    }

    fn get_active_users(&self) -> Result<Vec<User>> {
        Ok(self
            .repository
            .get_users()?
            .into_iter()
            .filter(|u| u.is_active)
            .collect())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let display_name = Self::validated_name(&new_user.display_name)?;
        let email = Self::validated_email(&new_user.email)?;
        self.repository
            .create_user(NewUser {
                display_name,
                email,
                ..new_user
            })
            .await
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User> {
        let display_name = update
            .display_name
            .map(|n| Self::validated_name(&n))
            .transpose()?;
        let email = update.email.map(|e| Self::validated_email(&e)).transpose()?;
        self.repository
            .update_user(
                id,
                UserUpdate {
                    display_name,
                    email,
                    ..update
                },
            )
            .await
    }

    async fn remove_user(&self, id: &str) -> Result<UserRemoval> {
        // Force a NotFound before touching anything.
        self.get_user(id)?;

        let assigned = self.creative_repository.count_by_assignee(id)?;
        if assigned > 0 {
            info!(
                "User '{}' has {} assigned creative(s); deactivating instead of deleting",
                id, assigned
            );
            self.repository
                .update_user(
                    id,
                    UserUpdate {
                        is_active: Some(false),
                        ..Default::default()
                    },
                )
                .await?;
            return Ok(UserRemoval::Deactivated);
        }

        self.repository.delete_user(id).await?;
        Ok(UserRemoval::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creatives::{Creative, CreativeUpdate, NewCreative};
    use crate::users::UserRole;
    use chrono::NaiveDate;
    use std::sync::RwLock;

    struct MockUserRepository {
        users: RwLock<Vec<User>>,
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        fn get_users(&self) -> Result<Vec<User>> {
            Ok(self.users.read().unwrap().clone())
        }
        fn get_user(&self, id: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .read()
                .unwrap()
                .iter()
                .find(|u| u.id == id)
                .cloned())
        }
        async fn create_user(&self, _: NewUser) -> Result<User> {
            unimplemented!()
        }
        async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User> {
            let mut users = self.users.write().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            if let Some(active) = update.is_active {
                user.is_active = active;
            }
            Ok(user.clone())
        }
        async fn delete_user(&self, id: &str) -> Result<usize> {
            let mut users = self.users.write().unwrap();
            let before = users.len();
            users.retain(|u| u.id != id);
            Ok(before - users.len())
        }
    }

    struct MockCreativeRepository {
        assigned: usize,
    }

    #[async_trait]
    impl CreativeRepositoryTrait for MockCreativeRepository {
        fn get_creatives(&self) -> Result<Vec<Creative>> {
            unimplemented!()
        }
        fn get_creative(&self, _: &str) -> Result<Option<Creative>> {
            unimplemented!()
        }
        fn count_by_assignee(&self, _: &str) -> Result<usize> {
            Ok(self.assigned)
        }
        async fn create_creative(&self, _: NewCreative) -> Result<Creative> {
            unimplemented!()
        }
        async fn update_creative(&self, _: &str, _: CreativeUpdate) -> Result<Creative> {
            unimplemented!()
        }
        async fn delete_creative(&self, _: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    fn user(id: &str) -> User {
        let ts = NaiveDate::from_ymd_opt(2026, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        User {
            id: id.to_string(),
            display_name: format!("User {}", id),
            email: format!("{}@example.com", id),
            role: UserRole::Editor,
            is_active: true,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn service(users: Vec<User>, assigned: usize) -> (UserService, Arc<MockUserRepository>) {
        let repo = Arc::new(MockUserRepository {
            users: RwLock::new(users),
        });
        (
            UserService::new(repo.clone(), Arc::new(MockCreativeRepository { assigned })),
            repo,
        )
    }

    #[tokio::test]
    async fn unreferenced_user_is_hard_deleted() {
        let (service, repo) = service(vec![user("u1")], 0);
        let outcome = service.remove_user("u1").await.unwrap();
        assert_eq!(outcome, UserRemoval::Deleted);
        assert!(repo.users.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn referenced_user_is_deactivated() {
        let (service, repo) = service(vec![user("u1")], 3);
        let outcome = service.remove_user("u1").await.unwrap();
        assert_eq!(outcome, UserRemoval::Deactivated);
        let users = repo.users.read().unwrap();
        assert_eq!(users.len(), 1);
        assert!(!users[0].is_active);
    }

    #[tokio::test]
    async fn create_rejects_bad_email() {
        let (service, _repo) = service(vec![], 0);
        let err = service
            .create_user(NewUser {
                id: None,
                display_name: "Jordan".to_string(),
                email: "not-an-email".to_string(),
                role: UserRole::Viewer,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
