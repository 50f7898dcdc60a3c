//! Blog entity representing a single blog post.

use chrono::{DateTime, Utc};

/// Public identity of the user who created a blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogOwner {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
}

/// A stored blog post.
///
/// `likes` is always non-negative; absence at creation time is normalized to
/// `0` before the record reaches storage. `user` is `None` only when the
/// owning account has been removed.
#[derive(Debug, Clone)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user: Option<BlogOwner>,
    pub created_at: DateTime<Utc>,
}

impl Blog {
    /// Creates a new Blog instance.
    pub fn new(
        id: i64,
        title: String,
        author: String,
        url: String,
        likes: i64,
        user: Option<BlogOwner>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            url,
            likes,
            user,
            created_at,
        }
    }

    /// Returns true if the post was created by the given user.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user.as_ref().is_some_and(|owner| owner.id == user_id)
    }
}

/// Input data for creating a new blog post.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user_id: i64,
}

/// Replacement values for an existing blog post.
///
/// `title` and `author` are always written. `None` for `url` or `likes`
/// leaves the stored value unchanged.
#[derive(Debug, Clone)]
pub struct BlogUpdate {
    pub title: String,
    pub author: String,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(id: i64) -> BlogOwner {
        BlogOwner {
            id,
            username: "mluukkai".to_string(),
            name: Some("Matti Luukkainen".to_string()),
        }
    }

    #[test]
    fn test_blog_creation() {
        let now = Utc::now();
        let blog = Blog::new(
            1,
            "React patterns".to_string(),
            "Michael Chan".to_string(),
            "https://reactpatterns.com/".to_string(),
            7,
            Some(owner(3)),
            now,
        );

        assert_eq!(blog.id, 1);
        assert_eq!(blog.title, "React patterns");
        assert_eq!(blog.likes, 7);
        assert_eq!(blog.created_at, now);
    }

    #[test]
    fn test_is_owned_by() {
        let blog = Blog::new(
            1,
            "Type wars".to_string(),
            "Robert C. Martin".to_string(),
            "http://blog.cleancoder.com/".to_string(),
            2,
            Some(owner(3)),
            Utc::now(),
        );

        assert!(blog.is_owned_by(3));
        assert!(!blog.is_owned_by(4));
    }

    #[test]
    fn test_orphaned_blog_has_no_owner() {
        let blog = Blog::new(
            1,
            "Type wars".to_string(),
            "Robert C. Martin".to_string(),
            "http://blog.cleancoder.com/".to_string(),
            2,
            None,
            Utc::now(),
        );

        assert!(!blog.is_owned_by(3));
    }
}
