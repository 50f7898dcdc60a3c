//! Aggregate statistics over a snapshot of blog posts.
//!
//! Every function here is pure: it reads a caller-owned slice and returns a
//! projection, or `None` when the slice is empty. Nothing is mutated, so the
//! functions may be called from any number of handlers concurrently.
//!
//! # Tie-breaking
//!
//! When several candidates share the maximum, the one seen **first** wins:
//!
//! - [`favorite_blog`] keeps the earliest post with the highest `likes`.
//! - [`author_with_most_posts`] and [`author_with_most_likes`] keep the author
//!   whose first post appears earliest in the input.
//!
//! Grouping goes through `AuthorTally`, which remembers insertion order, so
//! the result never depends on hash iteration order. `Iterator::max_by_key`
//! returns the *last* maximum, so it is not used here.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::entities::Blog;

/// The most liked post, projected to the fields clients display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: String,
    pub likes: i64,
}

/// The author with the largest number of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorPosts {
    pub author: String,
    pub blogs: u64,
}

/// The author whose posts received the most likes in total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: i64,
}

/// All aggregates for one snapshot, as served by `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogSummary {
    pub blog_count: u64,
    pub total_likes: i64,
    pub favorite_blog: Option<FavoriteBlog>,
    pub most_blogs: Option<AuthorPosts>,
    pub most_likes: Option<AuthorLikes>,
}

/// Sum of `likes` across all posts. Saturates at `i64::MAX`.
pub fn total_likes(blogs: &[Blog]) -> i64 {
    blogs
        .iter()
        .fold(0i64, |total, blog| total.saturating_add(blog.likes))
}

/// The first post holding the maximum number of likes.
pub fn favorite_blog(blogs: &[Blog]) -> Option<FavoriteBlog> {
    let (first, rest) = blogs.split_first()?;

    let favorite = rest.iter().fold(first, |best, blog| {
        if blog.likes > best.likes { blog } else { best }
    });

    Some(FavoriteBlog {
        title: favorite.title.clone(),
        author: favorite.author.clone(),
        likes: favorite.likes,
    })
}

/// The author with the most posts; ties go to the earliest-appearing author.
pub fn author_with_most_posts(blogs: &[Blog]) -> Option<AuthorPosts> {
    let mut tally = AuthorTally::default();
    for blog in blogs {
        tally.add(&blog.author, 1);
    }

    tally.leader().map(|(author, count)| AuthorPosts {
        author: author.to_string(),
        blogs: count,
    })
}

/// The author with the most likes in total; ties go to the earliest-appearing author.
pub fn author_with_most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    let mut tally = AuthorTally::default();
    for blog in blogs {
        tally.add(&blog.author, blog.likes);
    }

    tally.leader().map(|(author, likes)| AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

/// Computes every aggregate for the given snapshot.
pub fn summarize(blogs: &[Blog]) -> BlogSummary {
    BlogSummary {
        blog_count: blogs.len() as u64,
        total_likes: total_likes(blogs),
        favorite_blog: favorite_blog(blogs),
        most_blogs: author_with_most_posts(blogs),
        most_likes: author_with_most_likes(blogs),
    }
}

/// Per-author accumulator that preserves first-occurrence order.
struct AuthorTally<'a, V> {
    entries: Vec<(&'a str, V)>,
    index: HashMap<&'a str, usize>,
}

impl<V> Default for AuthorTally<'_, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<'a, V> AuthorTally<'a, V>
where
    V: Copy + Ord + Default + SaturatingAdd,
{
    fn add(&mut self, author: &'a str, amount: V) {
        match self.index.get(author) {
            Some(&position) => {
                let value = &mut self.entries[position].1;
                *value = (*value).saturating_add(amount);
            }
            None => {
                self.index.insert(author, self.entries.len());
                self.entries.push((author, V::default().saturating_add(amount)));
            }
        }
    }

    /// First entry in insertion order holding the maximum value.
    fn leader(&self) -> Option<(&'a str, V)> {
        let (first, rest) = self.entries.split_first()?;

        let leader = rest
            .iter()
            .fold(first, |best, entry| if entry.1 > best.1 { entry } else { best });

        Some(*leader)
    }
}

trait SaturatingAdd {
    fn saturating_add(self, other: Self) -> Self;
}

impl SaturatingAdd for i64 {
    fn saturating_add(self, other: Self) -> Self {
        i64::saturating_add(self, other)
    }
}

impl SaturatingAdd for u64 {
    fn saturating_add(self, other: Self) -> Self {
        u64::saturating_add(self, other)
    }
}
