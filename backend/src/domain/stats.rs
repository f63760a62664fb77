//! Aggregate statistics over a list of blogs.

use serde::Serialize;

use super::blog::Blog;

/// Error returned when a statistic needs at least one blog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot compute a favourite over an empty blog list")]
pub struct EmptyBlogList;

/// The most-liked blog, reduced to its presentation fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteBlog {
    /// Blog title.
    pub title: String,
    /// Optional author attribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Number of likes.
    pub likes: i32,
}

impl From<&Blog> for FavoriteBlog {
    fn from(blog: &Blog) -> Self {
        Self {
            title: blog.title().to_owned(),
            author: blog.author().map(str::to_owned),
            likes: blog.likes(),
        }
    }
}

/// Placeholder statistic kept for API compatibility; always `1`.
pub fn dummy(_blogs: &[Blog]) -> i32 {
    1
}

/// Sum of likes over all blogs; `0` for an empty list.
pub fn total_likes(blogs: &[Blog]) -> i64 {
    blogs.iter().map(|blog| i64::from(blog.likes())).sum()
}

/// The blog with the most likes.
///
/// Ties resolve to the first blog in input order. A strictly-greater
/// comparison keeps the earliest maximum; `Iterator::max_by_key` would keep
/// the last and must not be used here.
pub fn favorite_blog(blogs: &[Blog]) -> Result<FavoriteBlog, EmptyBlogList> {
    blogs
        .iter()
        .fold(None::<&Blog>, |best, blog| match best {
            Some(current) if blog.likes() > current.likes() => Some(blog),
            Some(current) => Some(current),
            None => Some(blog),
        })
        .map(FavoriteBlog::from)
        .ok_or(EmptyBlogList)
}
