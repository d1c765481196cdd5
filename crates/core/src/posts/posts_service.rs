//! Post service implementation.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::{Error, Result, ValidationError};

use super::{CalendarDay, NewPost, Post, PostRepositoryTrait, PostServiceTrait, PostUpdate};

pub struct PostService {
    repository: Arc<dyn PostRepositoryTrait>,
}

impl PostService {
    pub fn new(repository: Arc<dyn PostRepositoryTrait>) -> Self {
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
impl PostServiceTrait for PostService {
    fn get_posts(&self) -> Result<Vec<Post>> {
        self.repository.get_posts()
    }

    fn get_post(&self, id: &str) -> Result<Post> {
        self.repository
            .get_post(id)?
            .ok_or_else(|| Error::NotFound(format!("Post '{}' not found", id)))
    }

    fn get_posts_for_category(&self, category_id: &str) -> Result<Vec<Post>> {
        Ok(self
            .repository
            .get_posts()?
            .into_iter()
            .filter(|p| {
                p.main_category_id.as_deref() == Some(category_id)
                    || p.sub_category_id.as_deref() == Some(category_id)
                    || p.brand_type_id.as_deref() == Some(category_id)
            })
            .collect())
    }

    fn get_calendar(&self, year: i32, month: u32) -> Result<Vec<CalendarDay>> {
        if !(1..=12).contains(&month) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid month: {}",
                month
            ))));
        }

        let mut by_day: BTreeMap<NaiveDate, Vec<Post>> = BTreeMap::new();
        for post in self.repository.get_posts()? {
            let Some(scheduled) = post.scheduled_for else {
                continue;
            };
            let date = scheduled.date();
            if date.year() == year && date.month() == month {
                by_day.entry(date).or_default().push(post);
            }
        }

        Ok(by_day
            .into_iter()
            .map(|(date, mut posts)| {
                posts.sort_by(|a, b| a.scheduled_for.cmp(&b.scheduled_for));
                CalendarDay { date, posts }
            })
            .collect())
    }

    async fn create_post(&self, new_post: NewPost) -> Result<Post> {
        let title = Self::validated_title(&new_post.title)?;
        self.repository
            .create_post(NewPost { title, ..new_post })
            .await
    }

    async fn update_post(&self, id: &str, update: PostUpdate) -> Result<Post> {
        let update = match update.title {
            Some(title) => PostUpdate {
                title: Some(Self::validated_title(&title)?),
                ..update
            },
            None => update,
        };
        self.repository.update_post(id, update).await
    }

    async fn delete_post(&self, id: &str) -> Result<usize> {
        self.repository.delete_post(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::PostStatus;
    use chrono::NaiveDate;
    use std::sync::RwLock;

    struct MockPostRepository {
        posts: RwLock<Vec<Post>>,
    }

    impl MockPostRepository {
        fn new(posts: Vec<Post>) -> Self {
            Self {
                posts: RwLock::new(posts),
            }
        }
    }

    #[async_trait]
    impl PostRepositoryTrait for MockPostRepository {
        fn get_posts(&self) -> Result<Vec<Post>> {
            Ok(self.posts.read().unwrap().clone())
        }
        fn get_post(&self, id: &str) -> Result<Option<Post>> {
            Ok(self
                .posts
                .read()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }
        async fn create_post(&self, new_post: NewPost) -> Result<Post> {
            let ts = NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            let post = Post {
                id: new_post.id.unwrap_or_else(|| "p-new".to_string()),
                title: new_post.title,
                body: new_post.body,
                status: new_post.status,
                platform: new_post.platform,
                scheduled_for: new_post.scheduled_for,
                main_category_id: new_post.main_category_id,
                sub_category_id: new_post.sub_category_id,
                brand_type_id: new_post.brand_type_id,
                created_at: ts,
                updated_at: ts,
            };
            self.posts.write().unwrap().push(post.clone());
            Ok(post)
        }
        async fn update_post(&self, _: &str, _: PostUpdate) -> Result<Post> {
            unimplemented!()
        }
        async fn delete_post(&self, _: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    fn post(id: &str, title: &str, day: Option<u32>, main: Option<&str>) -> Post {
        let ts = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Post {
            id: id.to_string(),
            title: title.to_string(),
            body: None,
            status: PostStatus::Scheduled,
            platform: Some("instagram".to_string()),
            scheduled_for: day.map(|d| {
                NaiveDate::from_ymd_opt(2026, 3, d)
                    .unwrap()
                    .and_hms_opt(10, 0, 0)
                    .unwrap()
            }),
            main_category_id: main.map(str::to_string),
            sub_category_id: None,
            brand_type_id: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[tokio::test]
    async fn create_rejects_empty_title() {
        let service = PostService::new(Arc::new(MockPostRepository::new(vec![])));
        let err = service
            .create_post(NewPost {
                title: "   ".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn calendar_groups_by_day_within_month() {
        let service = PostService::new(Arc::new(MockPostRepository::new(vec![
            post("a", "A", Some(5), None),
            post("b", "B", Some(5), None),
            post("c", "C", Some(12), None),
            post("d", "D", None, None),
        ])));
        let days = service.get_calendar(2026, 3).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].posts.len(), 2);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2026, 3, 12).unwrap());
    }

    #[test]
    fn calendar_rejects_invalid_month() {
        let service = PostService::new(Arc::new(MockPostRepository::new(vec![])));
        assert!(matches!(
            service.get_calendar(2026, 13).unwrap_err(),
            Error::Validation(_)
        ));
    }

    #[test]
    fn category_filter_matches_any_tag_field() {
        let mut tagged = post("a", "A", None, Some("cat-1"));
        tagged.brand_type_id = Some("brand-1".to_string());
        let service = PostService::new(Arc::new(MockPostRepository::new(vec![
            tagged,
            post("b", "B", None, Some("cat-2")),
        ])));
        assert_eq!(service.get_posts_for_category("cat-1").unwrap().len(), 1);
        assert_eq!(service.get_posts_for_category("brand-1").unwrap().len(), 1);
        assert_eq!(service.get_posts_for_category("cat-9").unwrap().len(), 0);
    }

    #[test]
    fn missing_post_is_not_found() {
        let service = PostService::new(Arc::new(MockPostRepository::new(vec![])));
        assert!(matches!(
            service.get_post("gone").unwrap_err(),
            Error::NotFound(_)
        ));
    }
}
