//! Posts module - the content calendar.

mod posts_model;
mod posts_service;
mod posts_traits;

pub use posts_model::{CalendarDay, NewPost, Post, PostStatus, PostUpdate};
pub use posts_service::PostService;
pub use posts_traits::{PostRepositoryTrait, PostServiceTrait};
