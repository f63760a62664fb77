//! Diesel-backed `BlogRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{BlogPersistenceError, BlogRepository};
use crate::domain::{Blog, BlogId, BlogUpdate, BlogWithOwner, NewBlog};

use super::diesel_error_mapping::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::diesel_user_repository::{blog_from_row, user_from_row};
use super::models::{BlogChangeset, BlogRow, NewBlogRow, UserRow};
use super::pool::DbPool;
use super::schema::{blogs, users};

/// PostgreSQL-backed blog repository.
#[derive(Clone)]
pub struct DieselBlogRepository {
    pool: DbPool,
}

impl DieselBlogRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn connection_error(err: super::pool::PoolError) -> BlogPersistenceError {
    map_pool_error(err, BlogPersistenceError::connection)
}

fn query_error(err: diesel::result::Error) -> BlogPersistenceError {
    map_diesel_error(
        err,
        BlogPersistenceError::query,
        BlogPersistenceError::connection,
    )
}

#[async_trait]
impl BlogRepository for DieselBlogRepository {
    async fn list_with_owners(&self) -> Result<Vec<BlogWithOwner>, BlogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;
        let rows: Vec<(BlogRow, UserRow)> = blogs::table
            .inner_join(users::table)
            .select((BlogRow::as_select(), UserRow::as_select()))
            .order(blogs::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(query_error)?;

        rows.into_iter()
            .map(|(blog_row, user_row)| {
                let blog = blog_from_row(blog_row).map_err(BlogPersistenceError::query)?;
                let owner = user_from_row(user_row).map_err(BlogPersistenceError::query)?;
                Ok(BlogWithOwner { blog, owner })
            })
            .collect()
    }

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;
        let row: Option<BlogRow> = blogs::table
            .find(*id.as_uuid())
            .select(BlogRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_error)?;
        row.map(blog_from_row)
            .transpose()
            .map_err(BlogPersistenceError::query)
    }

    async fn create(&self, draft: &NewBlog) -> Result<Blog, BlogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;
        let owner = *draft.owner.as_uuid();
        let row = NewBlogRow {
            id: Uuid::new_v4(),
            user_id: owner,
            title: draft.title.as_ref(),
            author: draft.author.as_deref(),
            url: draft.url.as_ref(),
            likes: draft.likes,
        };

        // The owner check and the insert run in one transaction; the foreign
        // key would reject an unknown owner anyway, but checking first keeps
        // the failure distinguishable from other constraint errors.
        let stored = conn
            .transaction::<BlogRow, diesel::result::Error, _>(|conn| {
                async move {
                    let owner_exists: bool = diesel::select(diesel::dsl::exists(
                        users::table.filter(users::id.eq(owner)),
                    ))
                    .get_result(conn)
                    .await?;
                    if !owner_exists {
                        // Sentinel mapped to MissingOwner below; inserts
                        // cannot otherwise produce NotFound.
                        return Err(diesel::result::Error::NotFound);
                    }

                    diesel::insert_into(blogs::table)
                        .values(&row)
                        .returning(BlogRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| {
                if matches!(err, diesel::result::Error::NotFound) || is_foreign_key_violation(&err)
                {
                    BlogPersistenceError::missing_owner()
                } else {
                    query_error(err)
                }
            })?;

        blog_from_row(stored).map_err(BlogPersistenceError::query)
    }

    async fn update(
        &self,
        id: &BlogId,
        changes: &BlogUpdate,
    ) -> Result<Option<Blog>, BlogPersistenceError> {
        if changes.is_empty() {
            // Diesel rejects empty changesets; an update that changes
            // nothing degenerates to a read.
            return self.find_by_id(id).await;
        }

        let mut conn = self.pool.get().await.map_err(connection_error)?;
        let changeset = BlogChangeset {
            title: changes.title.as_ref().map(|title| title.as_ref()),
            author: changes.author.as_deref(),
            url: changes.url.as_ref().map(|url| url.as_ref()),
            likes: changes.likes,
        };

        let row: Option<BlogRow> = diesel::update(blogs::table.find(*id.as_uuid()))
            .set(&changeset)
            .returning(BlogRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(query_error)?;
        row.map(blog_from_row)
            .transpose()
            .map_err(BlogPersistenceError::query)
    }

    async fn delete(&self, id: &BlogId) -> Result<bool, BlogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;
        let deleted = diesel::delete(blogs::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(query_error)?;
        Ok(deleted > 0)
    }
}
