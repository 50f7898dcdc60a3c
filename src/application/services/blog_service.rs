//! Blog post management and analytics service.

use std::sync::Arc;

use crate::domain::analytics::{self, BlogSummary};
use crate::domain::entities::{Blog, BlogUpdate, NewBlog, User};
use crate::domain::repositories::BlogRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for creating, reading, updating and deleting blog posts.
///
/// Enforces the rules the storage layer cannot express on its own: required
/// fields must be non-empty, likes are never negative, and only the owner may
/// delete a post.
pub struct BlogService<B: BlogRepository + ?Sized> {
    repository: Arc<B>,
}

impl<B: BlogRepository + ?Sized> BlogService<B> {
    /// Creates a new blog service.
    pub fn new(repository: Arc<B>) -> Self {
        Self { repository }
    }

    /// Lists every blog post with its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_blogs(&self) -> Result<Vec<Blog>, AppError> {
        self.repository.list().await
    }

    /// Retrieves a single blog post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no post has the given id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_blog(&self, id: i64) -> Result<Blog, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Blog not found", json!({ "id": id })))
    }

    /// Creates a blog post owned by `owner`.
    ///
    /// Absent likes default to `0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if title, author or url is empty,
    /// or likes is negative.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_blog(
        &self,
        owner: &User,
        title: String,
        author: String,
        url: String,
        likes: Option<i64>,
    ) -> Result<Blog, AppError> {
        if [&title, &author, &url].iter().any(|v| v.trim().is_empty()) {
            return Err(AppError::bad_request(
                "Title, URL or Author missing",
                json!({ "required": ["title", "author", "url"] }),
            ));
        }

        let likes = validate_likes(likes)?.unwrap_or(0);

        let blog = self
            .repository
            .create(NewBlog {
                title,
                author,
                url,
                likes,
                user_id: owner.id,
            })
            .await?;

        metrics::counter!("blogs_created_total").increment(1);
        tracing::info!(blog_id = blog.id, user_id = owner.id, "Blog created");

        Ok(blog)
    }

    /// Replaces a blog post's fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if title or author is empty, or likes
    /// is negative.
    /// Returns [`AppError::NotFound`] if no post has the given id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_blog(&self, id: i64, update: BlogUpdate) -> Result<Blog, AppError> {
        if update.title.trim().is_empty() || update.author.trim().is_empty() {
            return Err(AppError::bad_request(
                "Title or Author missing",
                json!({ "required": ["title", "author"] }),
            ));
        }

        if update.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(AppError::bad_request(
                "URL must not be empty",
                json!({ "field": "url" }),
            ));
        }

        validate_likes(update.likes)?;

        self.repository
            .update(id, update)
            .await?
            .ok_or_else(|| AppError::not_found("Blog not found", json!({ "id": id })))
    }

    /// Deletes a blog post on behalf of `requester`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no post has the given id.
    /// Returns [`AppError::Forbidden`] if `requester` does not own the post.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_blog(&self, id: i64, requester: &User) -> Result<(), AppError> {
        let blog = self.get_blog(id).await?;

        if !blog.is_owned_by(requester.id) {
            tracing::warn!(
                blog_id = id,
                user_id = requester.id,
                "Rejected delete of blog owned by another user"
            );
            return Err(AppError::forbidden(
                "Permission denied",
                json!({ "id": id }),
            ));
        }

        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Blog not found", json!({ "id": id })));
        }

        tracing::info!(blog_id = id, user_id = requester.id, "Blog deleted");
        Ok(())
    }

    /// Computes aggregate statistics over every stored post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn summary(&self) -> Result<BlogSummary, AppError> {
        let blogs = self.repository.list().await?;
        Ok(analytics::summarize(&blogs))
    }

    /// Counts stored posts. Also serves as the database health probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_blogs(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Deletes every blog post. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_all(&self) -> Result<u64, AppError> {
        self.repository.delete_all().await
    }
}

fn validate_likes(likes: Option<i64>) -> Result<Option<i64>, AppError> {
    match likes {
        Some(l) if l < 0 => Err(AppError::bad_request(
            "Likes must not be negative",
            json!({ "likes": l }),
        )),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::BlogOwner;
    use crate::domain::repositories::MockBlogRepository;
    use chrono::Utc;

    fn test_user(id: i64) -> User {
        User::new(
            id,
            format!("user{id}"),
            Some("Test User".to_string()),
            "hash".to_string(),
            Utc::now(),
        )
    }

    fn test_blog(id: i64, owner_id: Option<i64>, likes: i64) -> Blog {
        Blog::new(
            id,
            "React patterns".to_string(),
            "Michael Chan".to_string(),
            "https://reactpatterns.com/".to_string(),
            likes,
            owner_id.map(|uid| BlogOwner {
                id: uid,
                username: format!("user{uid}"),
                name: None,
            }),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_get_blog_success() {
        let mut mock_repo = MockBlogRepository::new();
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(Some(test_blog(1, Some(1), 7))));

        let service = BlogService::new(Arc::new(mock_repo));
        let blog = service.get_blog(1).await.unwrap();

        assert_eq!(blog.id, 1);
        assert_eq!(blog.likes, 7);
    }

    #[tokio::test]
    async fn test_get_blog_not_found() {
        let mut mock_repo = MockBlogRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = BlogService::new(Arc::new(mock_repo));
        let result = service.get_blog(999).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_blog_defaults_likes_to_zero() {
        let mut mock_repo = MockBlogRepository::new();
        mock_repo
            .expect_create()
            .withf(|new_blog| new_blog.likes == 0 && new_blog.user_id == 5)
            .times(1)
            .returning(|new_blog| Ok(test_blog(10, Some(new_blog.user_id), new_blog.likes)));

        let service = BlogService::new(Arc::new(mock_repo));
        let blog = service
            .create_blog(
                &test_user(5),
                "Learning JavaScript Closures".to_string(),
                "Alice Johnson".to_string(),
                "https://example.com/js-closures".to_string(),
                None,
            )
            .await
            .unwrap();

        assert_eq!(blog.likes, 0);
        assert!(blog.is_owned_by(5));
    }

    #[tokio::test]
    async fn test_create_blog_missing_title() {
        let mock_repo = MockBlogRepository::new();
        let service = BlogService::new(Arc::new(mock_repo));

        let result = service
            .create_blog(
                &test_user(1),
                "".to_string(),
                "No Title Author".to_string(),
                "https://example.com/missing-title".to_string(),
                Some(5),
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_blog_negative_likes() {
        let mock_repo = MockBlogRepository::new();
        let service = BlogService::new(Arc::new(mock_repo));

        let result = service
            .create_blog(
                &test_user(1),
                "Title".to_string(),
                "Author".to_string(),
                "https://example.com".to_string(),
                Some(-1),
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_blog_requires_title_and_author() {
        let mock_repo = MockBlogRepository::new();
        let service = BlogService::new(Arc::new(mock_repo));

        let result = service
            .update_blog(
                1,
                BlogUpdate {
                    title: "".to_string(),
                    author: "".to_string(),
                    url: Some("https://example.com/invalid-update".to_string()),
                    likes: Some(100),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_blog_not_found() {
        let mut mock_repo = MockBlogRepository::new();
        mock_repo
            .expect_update()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = BlogService::new(Arc::new(mock_repo));
        let result = service
            .update_blog(
                404,
                BlogUpdate {
                    title: "Non-Existent Blog".to_string(),
                    author: "Unknown".to_string(),
                    url: None,
                    likes: Some(10),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_blog_by_owner() {
        let mut mock_repo = MockBlogRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_blog(id, Some(2), 0))));
        mock_repo
            .expect_delete()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(true));

        let service = BlogService::new(Arc::new(mock_repo));

        assert!(service.delete_blog(3, &test_user(2)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_blog_by_other_user_is_forbidden() {
        let mut mock_repo = MockBlogRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_blog(id, Some(2), 0))));
        mock_repo.expect_delete().never();

        let service = BlogService::new(Arc::new(mock_repo));
        let result = service.delete_blog(3, &test_user(9)).await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_delete_orphaned_blog_is_forbidden() {
        let mut mock_repo = MockBlogRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_blog(id, None, 0))));

        let service = BlogService::new(Arc::new(mock_repo));
        let result = service.delete_blog(3, &test_user(9)).await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_blog() {
        let mut mock_repo = MockBlogRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = BlogService::new(Arc::new(mock_repo));
        let result = service.delete_blog(3, &test_user(1)).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_summary_uses_all_blogs() {
        let mut mock_repo = MockBlogRepository::new();
        mock_repo.expect_list().times(1).returning(|| {
            Ok(vec![
                test_blog(1, Some(1), 3),
                test_blog(2, Some(1), 4),
            ])
        });

        let service = BlogService::new(Arc::new(mock_repo));
        let summary = service.summary().await.unwrap();

        assert_eq!(summary.blog_count, 2);
        assert_eq!(summary.total_likes, 7);
        assert_eq!(summary.most_blogs.unwrap().blogs, 2);
    }
}
