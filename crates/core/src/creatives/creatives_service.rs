//! Creative service implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{Error, Result, ValidationError};

use super::{
    Creative, CreativeRepositoryTrait, CreativeServiceTrait, CreativeStatus, CreativeUpdate,
    NewCreative,
};

pub struct CreativeService {
    repository: Arc<dyn CreativeRepositoryTrait>,
}

impl CreativeService {
    pub fn new(repository: Arc<dyn CreativeRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn validated_title(title: &str) -> Result<String> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        Ok(trimmed.to_string())
    }
}

#[async_trait]
impl CreativeServiceTrait for CreativeService {
    fn get_creatives(&self) -> Result<Vec<Creative>> {
        self.repository.get_creatives()
    }

    fn get_creative(&self, id: &str) -> Result<Creative> {
        self.repository
            .get_creative(id)?
            .ok_or_else(|| Error::NotFound(format!("Creative '{}' not found", id)))
    }

    fn get_backlog(&self) -> Result<Vec<Creative>> {
        let mut backlog: Vec<Creative> = self
            .repository
            .get_creatives()?
            .into_iter()
            .filter(|c| c.status != CreativeStatus::Delivered)
            .collect();
        // None sorts after every date.
        backlog.sort_by(|a, b| match (a.due_on, b.due_on) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        Ok(backlog)
    }

    async fn create_creative(&self, new_creative: NewCreative) -> Result<Creative> {
        let title = Self::validated_title(&new_creative.title)?;
        self.repository
            .create_creative(NewCreative {
                title,
                ..new_creative
            })
            .await
    }

    async fn update_creative(&self, id: &str, update: CreativeUpdate) -> Result<Creative> {
        let update = match update.title {
            Some(title) => CreativeUpdate {
                title: Some(Self::validated_title(&title)?),
                ..update
            },
            None => update,
        };
        self.repository.update_creative(id, update).await
    }

    async fn advance_status(&self, id: &str) -> Result<Creative> {
        let creative = self.get_creative(id)?;
        let next = creative.status.next().ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Creative '{}' is already delivered",
                id
            )))
        })?;
        self.repository
            .update_creative(
                id,
                CreativeUpdate {
                    status: Some(next),
                    ..Default::default()
                },
            )
            .await
    }

    async fn delete_creative(&self, id: &str) -> Result<usize> {
        self.repository.delete_creative(id).await
    }
}
