//! PostgreSQL implementation of blog repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Blog, BlogOwner, BlogUpdate, NewBlog};
use crate::domain::repositories::BlogRepository;
use crate::error::AppError;

/// Blog row joined with its owner.
#[derive(Debug, FromRow)]
struct BlogRow {
    id: i64,
    title: String,
    author: String,
    url: String,
    likes: i64,
    created_at: DateTime<Utc>,
    user_id: Option<i64>,
    username: Option<String>,
    user_name: Option<String>,
}

impl From<BlogRow> for Blog {
    fn from(row: BlogRow) -> Self {
        let user = match (row.user_id, row.username) {
            (Some(id), Some(username)) => Some(BlogOwner {
                id,
                username,
                name: row.user_name,
            }),
            _ => None,
        };

        Blog::new(
            row.id,
            row.title,
            row.author,
            row.url,
            row.likes,
            user,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for blog storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection.
pub struct PgBlogRepository {
    pool: Arc<PgPool>,
}

impl PgBlogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    async fn create(&self, new_blog: NewBlog) -> Result<Blog, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
        WITH inserted AS (
            INSERT INTO blogs (title, author, url, likes, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author, url, likes, created_at, user_id
        )
        SELECT
            i.id,
            i.title,
            i.author,
            i.url,
            i.likes,
            i.created_at,
            u.id AS user_id,
            u.username,
            u.name AS user_name
        FROM inserted i
        LEFT JOIN users u ON u.id = i.user_id
        "#,
        )
        .bind(&new_blog.title)
        .bind(&new_blog.author)
        .bind(&new_blog.url)
        .bind(new_blog.likes)
        .bind(new_blog.user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Blog>, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT b.id, b.title, b.author, b.url, b.likes, b.created_at,
                   u.id AS user_id, u.username, u.name AS user_name
            FROM blogs b
            LEFT JOIN users u ON u.id = b.user_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Blog::from))
    }

    async fn list(&self) -> Result<Vec<Blog>, AppError> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT b.id, b.title, b.author, b.url, b.likes, b.created_at,
                   u.id AS user_id, u.username, u.name AS user_name
            FROM blogs b
            LEFT JOIN users u ON u.id = b.user_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    async fn update(&self, id: i64, update: BlogUpdate) -> Result<Option<Blog>, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
        WITH updated AS (
            UPDATE blogs
            SET title  = $2,
                author = $3,
                url    = COALESCE($4, url),
                likes  = COALESCE($5, likes)
            WHERE id = $1
            RETURNING id, title, author, url, likes, created_at, user_id
        )
        SELECT
            b.id,
            b.title,
            b.author,
            b.url,
            b.likes,
            b.created_at,
            u.id AS user_id,
            u.username,
            u.name AS user_name
        FROM updated b
        LEFT JOIN users u ON u.id = b.user_id
        "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.author)
        .bind(update.url.as_deref())
        .bind(update.likes)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Blog::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blogs")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM blogs")
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
