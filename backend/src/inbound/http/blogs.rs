//! Blog API handlers.
//!
//! ```text
//! GET    /api/blogs
//! POST   /api/blogs        (bearer token required)
//! PUT    /api/blogs/{id}
//! DELETE /api/blogs/{id}   (bearer token required, owner only)
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Blog, BlogTitle, BlogUpdate, BlogUrl, BlogWithOwner, Error, NewBlog, User, UserId,
    authorize_owner_mutation,
};
use crate::inbound::http::bearer::BearerToken;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::port_errors::{map_blog_persistence_error, map_user_persistence_error};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_blog_id, require_field};

/// Owner summary embedded in blog listings.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogOwnerResponse {
    /// Owning user's identifier.
    pub id: String,
    /// Owning user's login name.
    pub username: String,
    /// Owning user's display name, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&User> for BlogOwnerResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            name: user.name().map(str::to_owned),
        }
    }
}

/// Blog entry returned by `GET /api/blogs`, owner populated.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogListEntry {
    /// Blog identifier.
    pub id: String,
    /// Blog title.
    pub title: String,
    /// Optional author attribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Blog link.
    pub url: String,
    /// Number of likes.
    pub likes: i32,
    /// The user who created the blog.
    pub user: BlogOwnerResponse,
}

impl From<&BlogWithOwner> for BlogListEntry {
    fn from(entry: &BlogWithOwner) -> Self {
        Self {
            id: entry.blog.id().to_string(),
            title: entry.blog.title().to_owned(),
            author: entry.blog.author().map(str::to_owned),
            url: entry.blog.url().to_owned(),
            likes: entry.blog.likes(),
            user: BlogOwnerResponse::from(&entry.owner),
        }
    }
}

/// Blog returned by the mutation endpoints, owner as a bare identifier.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    /// Blog identifier.
    pub id: String,
    /// Blog title.
    pub title: String,
    /// Optional author attribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Blog link.
    pub url: String,
    /// Number of likes.
    pub likes: i32,
    /// Identifier of the owning user.
    pub user: String,
}

impl From<&Blog> for BlogResponse {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id().to_string(),
            title: blog.title().to_owned(),
            author: blog.author().map(str::to_owned),
            url: blog.url().to_owned(),
            likes: blog.likes(),
            user: blog.owner().to_string(),
        }
    }
}

/// Request body for `POST /api/blogs`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    /// Blog title (required).
    pub title: Option<String>,
    /// Optional author attribution.
    pub author: Option<String>,
    /// Blog link (required).
    pub url: Option<String>,
    /// Initial like count; zero when omitted.
    pub likes: Option<i32>,
}

/// Request body for `PUT /api/blogs/{id}`; absent fields stay unchanged.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement author attribution.
    pub author: Option<String>,
    /// Replacement link.
    pub url: Option<String>,
    /// Replacement like count.
    pub likes: Option<i32>,
}

fn draft_from_request(body: CreateBlogRequest, owner: UserId) -> Result<NewBlog, Error> {
    let title = BlogTitle::new(require_field(body.title, "title")?)?;
    let url = BlogUrl::new(require_field(body.url, "url")?)?;
    Ok(NewBlog::new(title, body.author, url, body.likes, owner)?)
}

fn update_from_request(body: UpdateBlogRequest) -> Result<BlogUpdate, Error> {
    Ok(BlogUpdate {
        title: body.title.map(BlogTitle::new).transpose()?,
        author: body.author,
        url: body.url.map(BlogUrl::new).transpose()?,
        likes: body.likes,
    })
}

/// List all blogs with their owners populated.
#[utoipa::path(
    get,
    path = "/api/blogs",
    responses(
        (status = 200, description = "All blogs", body = [BlogListEntry]),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["blogs"],
    operation_id = "listBlogs"
)]
#[get("/blogs")]
pub async fn list_blogs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<BlogListEntry>>> {
    let blogs = state
        .blogs
        .list_with_owners()
        .await
        .map_err(map_blog_persistence_error)?;
    Ok(web::Json(blogs.iter().map(BlogListEntry::from).collect()))
}

/// Create a blog owned by the token's subject.
#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ErrorBody),
        (status = 401, description = "Token missing or invalid", body = crate::inbound::http::error::ErrorBody)
    ),
    security(("bearer_token" = [])),
    tags = ["blogs"],
    operation_id = "createBlog"
)]
#[post("/blogs")]
pub async fn create_blog(
    state: web::Data<HttpState>,
    bearer: BearerToken,
    payload: web::Json<CreateBlogRequest>,
) -> ApiResult<HttpResponse> {
    let subject = bearer.require_subject(state.tokens.as_ref())?;
    let owner = state
        .users
        .find_by_id(&subject)
        .await
        .map_err(map_user_persistence_error)?
        .ok_or_else(|| Error::unauthorized("token missing or invalid"))?;

    let draft = draft_from_request(payload.into_inner(), *owner.id())?;
    let blog = state
        .blogs
        .create(&draft)
        .await
        .map_err(map_blog_persistence_error)?;
    Ok(HttpResponse::Created().json(BlogResponse::from(&blog)))
}

/// Replace fields of an existing blog.
///
/// No ownership check is performed here; any caller can update any blog
/// while create and delete are token-gated.
// TODO: require the caller to own the blog before applying updates, the way
// delete does.
#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "No such blog", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["blogs"],
    operation_id = "updateBlog"
)]
#[put("/blogs/{id}")]
pub async fn update_blog(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateBlogRequest>,
) -> ApiResult<web::Json<BlogResponse>> {
    let id = parse_blog_id(&path.into_inner())?;
    let changes = update_from_request(payload.into_inner())?;
    let blog = state
        .blogs
        .update(&id, &changes)
        .await
        .map_err(map_blog_persistence_error)?
        .ok_or_else(|| Error::not_found("blog not found"))?;
    Ok(web::Json(BlogResponse::from(&blog)))
}

/// Delete a blog; only its owner may do so.
#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 400, description = "Malformed blog id", body = crate::inbound::http::error::ErrorBody),
        (status = 401, description = "Token missing, invalid, or not the owner", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "No such blog", body = crate::inbound::http::error::ErrorBody)
    ),
    security(("bearer_token" = [])),
    tags = ["blogs"],
    operation_id = "deleteBlog"
)]
#[delete("/blogs/{id}")]
pub async fn delete_blog(
    state: web::Data<HttpState>,
    bearer: BearerToken,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let subject = bearer.require_subject(state.tokens.as_ref())?;
    let id = parse_blog_id(&path.into_inner())?;
    let blog = state
        .blogs
        .find_by_id(&id)
        .await
        .map_err(map_blog_persistence_error)?
        .ok_or_else(|| Error::not_found("blog not found"))?;

    authorize_owner_mutation(&subject, blog.owner())?;

    state
        .blogs
        .delete(&id)
        .await
        .map_err(map_blog_persistence_error)?;
    Ok(HttpResponse::NoContent().finish())
}
