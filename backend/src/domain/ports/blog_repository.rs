//! Port abstraction for blog persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Blog, BlogId, BlogUpdate, BlogWithOwner, NewBlog};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by blog repository adapters.
    pub enum BlogPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "blog repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "blog repository query failed: {message}",
        /// The owner stamped on a draft does not exist.
        MissingOwner => "blog owner does not exist",
    }
}

/// Persistence port for blog posts.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// All blogs with their owners resolved, in creation order.
    async fn list_with_owners(&self) -> Result<Vec<BlogWithOwner>, BlogPersistenceError>;

    /// Fetch a blog by identifier.
    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogPersistenceError>;

    /// Store a draft and return the stored blog.
    ///
    /// The insert and the owner linkage are one atomic write: the draft
    /// carries the owner reference, and adapters must not leave a blog
    /// behind when the owner cannot be resolved.
    async fn create(&self, draft: &NewBlog) -> Result<Blog, BlogPersistenceError>;

    /// Apply a partial update; `None` when no blog has that identifier.
    async fn update(
        &self,
        id: &BlogId,
        changes: &BlogUpdate,
    ) -> Result<Option<Blog>, BlogPersistenceError>;

    /// Delete a blog; `false` when no blog had that identifier.
    async fn delete(&self, id: &BlogId) -> Result<bool, BlogPersistenceError>;
}
