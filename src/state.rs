//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, BlogService, UserService};
use crate::domain::repositories::{BlogRepository, TokenRepository, UserRepository};

/// Blog service over any [`BlogRepository`] implementation.
pub type DynBlogService = BlogService<dyn BlogRepository>;
/// User service over any repository implementations.
pub type DynUserService = UserService<dyn UserRepository, dyn BlogRepository>;
/// Auth service over any repository implementations.
pub type DynAuthService = AuthService<dyn UserRepository, dyn TokenRepository>;

/// Settings the services need beyond their repositories.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub token_signing_secret: String,
    pub token_ttl_seconds: u64,
    pub bcrypt_cost: u32,
}

#[derive(Clone)]
pub struct AppState {
    pub blog_service: Arc<DynBlogService>,
    pub user_service: Arc<DynUserService>,
    pub auth_service: Arc<DynAuthService>,
}

impl AppState {
    /// Wires services on top of the given repositories.
    ///
    /// Handlers never see the concrete storage, so the same router runs over
    /// PostgreSQL in production and over in-memory repositories in tests.
    pub fn new(
        blogs: Arc<dyn BlogRepository>,
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        settings: AuthSettings,
    ) -> Self {
        let blog_service = Arc::new(BlogService::new(blogs.clone()));
        let user_service = Arc::new(UserService::new(
            users.clone(),
            blogs,
            settings.bcrypt_cost,
        ));
        let auth_service = Arc::new(AuthService::new(
            users,
            tokens,
            settings.token_signing_secret,
            settings.token_ttl_seconds,
        ));

        Self {
            blog_service,
            user_service,
            auth_service,
        }
    }
}
