//! User registration and listing handlers.
//!
//! ```text
//! POST /api/users {"username":"root","name":"Superuser","password":"sekret"}
//! GET  /api/users
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewUser, User, UserWithBlogs, Username, hash_password};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::port_errors::map_user_persistence_error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_field;

/// Minimum password length accepted at registration.
const PASSWORD_MIN: usize = 3;

/// Request body for `POST /api/users`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Unique login name (required, at least 3 characters).
    pub username: Option<String>,
    /// Optional display name.
    pub name: Option<String>,
    /// Password (required, at least 3 characters); never stored as given.
    pub password: Option<String>,
}

/// Account returned by the registration endpoint.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Display name, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            name: user.name().map(str::to_owned),
        }
    }
}

/// Blog summary embedded in the users listing.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBlogEntry {
    /// Blog identifier.
    pub id: String,
    /// Blog title.
    pub title: String,
    /// Optional author attribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Blog link.
    pub url: String,
}

/// User entry returned by `GET /api/users`, blogs populated.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListEntry {
    /// User identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Display name, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Blogs owned by the user.
    pub blogs: Vec<UserBlogEntry>,
}

impl From<&UserWithBlogs> for UserListEntry {
    fn from(entry: &UserWithBlogs) -> Self {
        Self {
            id: entry.user.id().to_string(),
            username: entry.user.username().to_string(),
            name: entry.user.name().map(str::to_owned),
            blogs: entry
                .blogs
                .iter()
                .map(|blog| UserBlogEntry {
                    id: blog.id().to_string(),
                    title: blog.title().to_owned(),
                    author: blog.author().map(str::to_owned),
                    url: blog.url().to_owned(),
                })
                .collect(),
        }
    }
}

fn validate_password(password: Option<String>) -> Result<String, Error> {
    let password = require_field(password, "password")?;
    if password.chars().count() < PASSWORD_MIN {
        return Err(Error::invalid_request(format!(
            "password must be at least {PASSWORD_MIN} characters long"
        )));
    }
    Ok(password)
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request or duplicate username", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let username = Username::new(require_field(body.username, "username")?)?;
    let password = validate_password(body.password)?;

    // Argon2id is deliberately slow; keep it off the async workers.
    let password_hash = web::block(move || hash_password(&password))
        .await
        .map_err(|err| Error::internal(format!("hashing task failed: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))?;

    let new_user = NewUser {
        username,
        name: body.name,
        password_hash,
    };
    let user = state
        .users
        .insert(&new_user)
        .await
        .map_err(map_user_persistence_error)?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// List all accounts with their blogs populated.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All accounts", body = [UserListEntry]),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserListEntry>>> {
    let users = state
        .users
        .list_with_blogs()
        .await
        .map_err(map_user_persistence_error)?;
    Ok(web::Json(users.iter().map(UserListEntry::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(None, "missing required field: password")]
    #[case(Some("pw"), "password must be at least 3 characters long")]
    fn password_rules(#[case] password: Option<&str>, #[case] expected: &str) {
        let err = validate_password(password.map(str::to_owned)).expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), expected);
    }

    #[test]
    fn password_of_three_characters_passes() {
        let password = validate_password(Some("abc".to_owned())).expect("valid password");
        assert_eq!(password, "abc");
    }
}
