#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::http::StatusCode;
use axum_test::TestServer;
use bloglist::config::{AppEnv, Config};
use bloglist::domain::entities::{Blog, BlogOwner, BlogUpdate, NewBlog, NewUser, User};
use bloglist::domain::repositories::{
    BlogRepository, SessionToken, TokenRepository, UserRepository,
};
use bloglist::error::AppError;
use bloglist::routes::app_router;
use bloglist::state::{AppState, AuthSettings};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

pub const TEST_SECRET: &str = "test-signing-secret";

#[derive(Debug, Clone)]
struct StoredBlog {
    id: i64,
    title: String,
    author: String,
    url: String,
    likes: i64,
    user_id: Option<i64>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredToken {
    token: SessionToken,
    last_used_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct Store {
    users: Vec<User>,
    blogs: Vec<StoredBlog>,
    tokens: Vec<StoredToken>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn owner(&self, user_id: Option<i64>) -> Option<BlogOwner> {
        let id = user_id?;
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| BlogOwner {
                id: u.id,
                username: u.username.clone(),
                name: u.name.clone(),
            })
    }

    fn to_blog(&self, stored: &StoredBlog) -> Blog {
        Blog::new(
            stored.id,
            stored.title.clone(),
            stored.author.clone(),
            stored.url.clone(),
            stored.likes,
            self.owner(stored.user_id),
            stored.created_at,
        )
    }
}

/// In-memory stand-in for PostgreSQL, implementing every repository trait
/// with the same observable semantics as the `Pg*` repositories.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    store: Mutex<Store>,
    failing: AtomicBool,
}

impl InMemoryRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every subsequent call fail like a lost database connection.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Moves the expiry of every stored token into the past.
    pub fn expire_all_tokens(&self) {
        let mut store = self.store.lock().unwrap();
        for stored in &mut store.tokens {
            stored.token.expires_at = Utc::now() - chrono::Duration::seconds(1);
        }
    }

    pub fn token_hashes(&self) -> Vec<String> {
        let store = self.store.lock().unwrap();
        store
            .tokens
            .iter()
            .map(|t| t.token.token_hash.clone())
            .collect()
    }

    pub fn blog_count(&self) -> usize {
        self.store.lock().unwrap().blogs.len()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(self.store.lock().unwrap())
    }
}

#[async_trait]
impl BlogRepository for InMemoryRepository {
    async fn create(&self, new_blog: NewBlog) -> Result<Blog, AppError> {
        let mut store = self.lock()?;
        let id = store.next_id();
        let stored = StoredBlog {
            id,
            title: new_blog.title,
            author: new_blog.author,
            url: new_blog.url,
            likes: new_blog.likes,
            user_id: Some(new_blog.user_id),
            created_at: Utc::now(),
        };
        let blog = store.to_blog(&stored);
        store.blogs.push(stored);
        Ok(blog)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Blog>, AppError> {
        let store = self.lock()?;
        Ok(store
            .blogs
            .iter()
            .find(|b| b.id == id)
            .map(|b| store.to_blog(b)))
    }

    async fn list(&self) -> Result<Vec<Blog>, AppError> {
        let store = self.lock()?;
        Ok(store.blogs.iter().map(|b| store.to_blog(b)).collect())
    }

    async fn update(&self, id: i64, update: BlogUpdate) -> Result<Option<Blog>, AppError> {
        let mut store = self.lock()?;
        let Some(stored) = store.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };

        stored.title = update.title;
        stored.author = update.author;
        if let Some(url) = update.url {
            stored.url = url;
        }
        if let Some(likes) = update.likes {
            stored.likes = likes;
        }

        let stored = stored.clone();
        Ok(Some(store.to_blog(&stored)))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut store = self.lock()?;
        let before = store.blogs.len();
        store.blogs.retain(|b| b.id != id);
        Ok(store.blogs.len() < before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.blogs.len() as i64)
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let mut store = self.lock()?;
        let removed = store.blogs.len() as u64;
        store.blogs.clear();
        Ok(removed)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut store = self.lock()?;
        if store.users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::conflict(
                "Username must be unique",
                json!({ "username": new_user.username }),
            ));
        }

        let id = store.next_id();
        let user = User::new(
            id,
            new_user.username,
            new_user.name,
            new_user.password_hash,
            Utc::now(),
        );
        store.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.lock()?.users.clone())
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let mut store = self.lock()?;
        let removed = store.users.len() as u64;
        store.users.clear();
        store.tokens.clear();
        for blog in &mut store.blogs {
            blog.user_id = None;
        }
        Ok(removed)
    }
}

#[async_trait]
impl TokenRepository for InMemoryRepository {
    async fn create_token(
        &self,
        user_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<SessionToken, AppError> {
        let mut store = self.lock()?;
        let id = store.next_id();
        let token = SessionToken {
            id,
            user_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            expires_at,
            revoked_at: None,
        };
        store.tokens.push(StoredToken {
            token: token.clone(),
            last_used_at: None,
        });
        Ok(token)
    }

    async fn find_user_by_token(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        let store = self.lock()?;
        let now = Utc::now();
        let user_id = store
            .tokens
            .iter()
            .find(|t| {
                t.token.token_hash == token_hash
                    && t.token.revoked_at.is_none()
                    && t.token.expires_at > now
            })
            .map(|t| t.token.user_id);

        Ok(user_id.and_then(|id| store.users.iter().find(|u| u.id == id).cloned()))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut store = self.lock()?;
        for stored in &mut store.tokens {
            if stored.token.token_hash == token_hash && stored.token.revoked_at.is_none() {
                stored.last_used_at = Some(Utc::now());
            }
        }
        Ok(())
    }

    async fn revoke_user_tokens(&self, user_id: i64) -> Result<u64, AppError> {
        let mut store = self.lock()?;
        let mut revoked = 0;
        for stored in &mut store.tokens {
            if stored.token.user_id == user_id && stored.token.revoked_at.is_none() {
                stored.token.revoked_at = Some(Utc::now());
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}

pub fn test_config() -> Config {
    Config {
        app_env: AppEnv::Test,
        database_url: "postgres://localhost/bloglist_test".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        behind_proxy: false,
        rate_limit_enabled: false,
        token_signing_secret: TEST_SECRET.to_string(),
        token_ttl_seconds: 3600,
        bcrypt_cost: 4,
        static_dir: "tests/static".to_string(),
        db_max_connections: 1,
        db_connect_timeout: 1,
        db_idle_timeout: 1,
        db_max_lifetime: 1,
        db_connect_retries: 1,
    }
}

pub fn create_test_state(repo: Arc<InMemoryRepository>, config: &Config) -> AppState {
    AppState::new(
        repo.clone(),
        repo.clone(),
        repo,
        AuthSettings {
            token_signing_secret: config.token_signing_secret.clone(),
            token_ttl_seconds: config.token_ttl_seconds,
            bcrypt_cost: config.bcrypt_cost,
        },
    )
}

/// Full application router over `repo`, with the given configuration.
pub fn make_server_with_config(repo: Arc<InMemoryRepository>, config: Config) -> TestServer {
    let state = create_test_state(repo, &config);
    let app = Router::new().fallback_service(app_router(state, &config));
    TestServer::new(app).unwrap()
}

/// Full application router over `repo`, in the test environment.
pub fn make_server(repo: Arc<InMemoryRepository>) -> TestServer {
    make_server_with_config(repo, test_config())
}

pub async fn create_user(server: &TestServer, username: &str, name: &str, password: &str) -> Value {
    let response = server
        .post("/api/users")
        .json(&json!({ "username": username, "name": name, "password": password }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/login")
        .json(&json!({ "username": username, "password": password }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Registers `username` and returns a bearer token for it.
pub async fn create_user_and_login(server: &TestServer, username: &str) -> String {
    create_user(server, username, "Test User", "salainen").await;
    login(server, username, "salainen").await
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn create_blog(
    server: &TestServer,
    token: &str,
    title: &str,
    author: &str,
    likes: i64,
) -> Value {
    let response = server
        .post("/api/blogs")
        .add_header("Authorization", bearer(token))
        .json(&json!({
            "title": title,
            "author": author,
            "url": format!("https://example.com/{}", title.replace(' ', "-")),
            "likes": likes
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

/// The six posts used across the statistics tests, in insertion order.
pub const SAMPLE_BLOGS: [(&str, &str, i64); 6] = [
    ("React patterns", "Michael Chan", 7),
    ("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
    ("Canonical string reduction", "Edsger W. Dijkstra", 12),
    ("First class tests", "Robert C. Martin", 10),
    ("TDD harms architecture", "Robert C. Martin", 0),
    ("Type wars", "Robert C. Martin", 2),
];

pub async fn seed_sample_blogs(server: &TestServer, token: &str) {
    for (title, author, likes) in SAMPLE_BLOGS {
        create_blog(server, token, title, author, likes).await;
    }
}
