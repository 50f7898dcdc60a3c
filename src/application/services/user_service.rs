//! User registration and listing service.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{Blog, NewUser, User};
use crate::domain::repositories::{BlogRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::hash_password;
use serde_json::json;

/// Minimum length for both usernames and passwords.
pub const MIN_CREDENTIAL_LENGTH: usize = 3;

/// A user together with the posts they created.
#[derive(Debug, Clone)]
pub struct UserWithBlogs {
    pub user: User,
    pub blogs: Vec<Blog>,
}

/// Service for registering users and listing them with their posts.
pub struct UserService<U: UserRepository + ?Sized, B: BlogRepository + ?Sized> {
    user_repository: Arc<U>,
    blog_repository: Arc<B>,
    bcrypt_cost: u32,
}

impl<U: UserRepository + ?Sized, B: BlogRepository + ?Sized> UserService<U, B> {
    /// Creates a new user service.
    ///
    /// # Arguments
    ///
    /// - `bcrypt_cost` - work factor for password hashing (4..=31)
    pub fn new(user_repository: Arc<U>, blog_repository: Arc<B>, bcrypt_cost: u32) -> Self {
        Self {
            user_repository,
            blog_repository,
            bcrypt_cost,
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if username or password is shorter than
    /// [`MIN_CREDENTIAL_LENGTH`].
    /// Returns [`AppError::Conflict`] if the username is taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn create_user(
        &self,
        username: String,
        name: Option<String>,
        password: String,
    ) -> Result<User, AppError> {
        let username = username.trim().to_string();

        if username.chars().count() < MIN_CREDENTIAL_LENGTH {
            return Err(AppError::bad_request(
                "Username must be at least 3 characters long",
                json!({ "field": "username", "min_length": MIN_CREDENTIAL_LENGTH }),
            ));
        }

        if password.chars().count() < MIN_CREDENTIAL_LENGTH {
            return Err(AppError::bad_request(
                "Password must be at least 3 characters long",
                json!({ "field": "password", "min_length": MIN_CREDENTIAL_LENGTH }),
            ));
        }

        let password_hash = hash_password(password, self.bcrypt_cost).await?;
        let name = name.filter(|n| !n.trim().is_empty());

        let user = self
            .user_repository
            .create(NewUser {
                username,
                name,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Looks up a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no such user exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_username(&self, username: &str) -> Result<User, AppError> {
        self.user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "username": username })))
    }

    /// Lists every user together with the posts they own.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_with_blogs(&self) -> Result<Vec<UserWithBlogs>, AppError> {
        let users = self.user_repository.list().await?;
        let blogs = self.blog_repository.list().await?;

        let mut by_owner: HashMap<i64, Vec<Blog>> = HashMap::new();
        for blog in blogs {
            if let Some(owner_id) = blog.user.as_ref().map(|owner| owner.id) {
                by_owner.entry(owner_id).or_default().push(blog);
            }
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let blogs = by_owner.remove(&user.id).unwrap_or_default();
                UserWithBlogs { user, blogs }
            })
            .collect())
    }

    /// Deletes every user. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_all(&self) -> Result<u64, AppError> {
        self.user_repository.delete_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::BlogOwner;
    use crate::domain::repositories::{MockBlogRepository, MockUserRepository};
    use chrono::Utc;

    const TEST_COST: u32 = 4;

    fn test_user(id: i64, username: &str) -> User {
        User::new(id, username.to_string(), None, "hash".to_string(), Utc::now())
    }

    fn owned_blog(id: i64, owner_id: i64) -> Blog {
        Blog::new(
            id,
            format!("Blog {id}"),
            "Author".to_string(),
            "https://example.com".to_string(),
            1,
            Some(BlogOwner {
                id: owner_id,
                username: format!("user{owner_id}"),
                name: None,
            }),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_create()
            .withf(|new_user| {
                new_user.username == "mluukkai"
                    && new_user.password_hash != "salainen"
                    && new_user.password_hash.starts_with("$2")
            })
            .times(1)
            .returning(|new_user| {
                Ok(User::new(
                    1,
                    new_user.username,
                    new_user.name,
                    new_user.password_hash,
                    Utc::now(),
                ))
            });

        let service = UserService::new(
            Arc::new(mock_users),
            Arc::new(MockBlogRepository::new()),
            TEST_COST,
        );

        let user = service
            .create_user(
                "mluukkai".to_string(),
                Some("Matti Luukkainen".to_string()),
                "salainen".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(user.username, "mluukkai");
        assert_eq!(user.name.as_deref(), Some("Matti Luukkainen"));
    }

    #[tokio::test]
    async fn test_create_user_short_username() {
        let service = UserService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockBlogRepository::new()),
            TEST_COST,
        );

        let result = service
            .create_user("ml".to_string(), None, "salainen".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_user_short_password() {
        let service = UserService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockBlogRepository::new()),
            TEST_COST,
        );

        let result = service
            .create_user("mluukkai".to_string(), None, "pw".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_user_conflict_propagates() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Username must be unique", json!({}))));

        let service = UserService::new(
            Arc::new(mock_users),
            Arc::new(MockBlogRepository::new()),
            TEST_COST,
        );

        let result = service
            .create_user("root".to_string(), None, "salainen".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_list_with_blogs_groups_by_owner() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![test_user(1, "alice"), test_user(2, "bob")]));

        let mut mock_blogs = MockBlogRepository::new();
        mock_blogs
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![owned_blog(10, 1), owned_blog(11, 1), owned_blog(12, 3)]));

        let service = UserService::new(Arc::new(mock_users), Arc::new(mock_blogs), TEST_COST);
        let listed = service.list_with_blogs().await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].user.username, "alice");
        assert_eq!(listed[0].blogs.len(), 2);
        assert!(listed[1].blogs.is_empty());
    }
}
