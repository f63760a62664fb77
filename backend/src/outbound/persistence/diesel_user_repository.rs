//! Diesel-backed `UserRepository` adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    Blog, NewUser, PasswordHash, User, UserCredentials, UserId, UserWithBlogs, Username,
};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{BlogRow, NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::{blogs, users};

/// PostgreSQL-backed user repository.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn connection_error(err: super::pool::PoolError) -> UserPersistenceError {
    map_pool_error(err, UserPersistenceError::connection)
}

fn query_error(err: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        err,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Translate a stored row into a domain user.
///
/// Stored rows were validated on the way in, so a failure here means the
/// database holds data this code no longer accepts.
pub(super) fn user_from_row(row: UserRow) -> Result<User, String> {
    let username = Username::new(row.username)
        .map_err(|err| format!("stored username failed validation: {err}"))?;
    Ok(User::new(UserId::from(row.id), username, row.name))
}

pub(super) fn blog_from_row(row: BlogRow) -> Result<Blog, String> {
    let title = crate::domain::BlogTitle::new(row.title)
        .map_err(|err| format!("stored blog title failed validation: {err}"))?;
    let url = crate::domain::BlogUrl::new(row.url)
        .map_err(|err| format!("stored blog url failed validation: {err}"))?;
    Ok(Blog::new(
        crate::domain::BlogId::from(row.id),
        title,
        row.author,
        url,
        row.likes,
        UserId::from(row.user_id),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;
        let row = NewUserRow {
            id: Uuid::new_v4(),
            username: new_user.username.as_ref(),
            name: new_user.name.as_deref(),
            password_hash: new_user.password_hash.as_str(),
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_username(new_user.username.as_ref())
                } else {
                    query_error(err)
                }
            })?;

        user_from_row(stored).map_err(UserPersistenceError::query)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;
        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_error)?;
        row.map(user_from_row)
            .transpose()
            .map_err(UserPersistenceError::query)
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_error)?;

        row.map(|row| {
            let password_hash = PasswordHash::from_phc_string(row.password_hash.clone());
            let user = user_from_row(row).map_err(UserPersistenceError::query)?;
            Ok(UserCredentials {
                user,
                password_hash,
            })
        })
        .transpose()
    }

    async fn list_with_blogs(&self) -> Result<Vec<UserWithBlogs>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(connection_error)?;
        let user_rows: Vec<UserRow> = users::table
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_error)?;
        let blog_rows: Vec<BlogRow> = blogs::table
            .order(blogs::created_at.asc())
            .select(BlogRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_error)?;

        let mut blogs_by_owner: HashMap<Uuid, Vec<Blog>> = HashMap::new();
        for row in blog_rows {
            let owner = row.user_id;
            let blog = blog_from_row(row).map_err(UserPersistenceError::query)?;
            blogs_by_owner.entry(owner).or_default().push(blog);
        }

        user_rows
            .into_iter()
            .map(|row| {
                let user = user_from_row(row).map_err(UserPersistenceError::query)?;
                let blogs = blogs_by_owner
                    .remove(user.id().as_uuid())
                    .unwrap_or_default();
                Ok(UserWithBlogs { user, blogs })
            })
            .collect()
    }
}
