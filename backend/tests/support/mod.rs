//! Shared fixtures for the HTTP integration tests.
//!
//! `MemoryStore` implements the domain ports over a mutex-guarded in-memory
//! state so the full HTTP surface can be exercised without PostgreSQL. The
//! app under test is assembled by the same `build_app` wiring that `main`
//! uses.

use std::sync::{Arc, Mutex, MutexGuard};

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{test, web};
use async_trait::async_trait;

use backend::domain::ports::{
    BlogPersistenceError, BlogRepository, LoginService, UserPersistenceError, UserRepository,
};
use backend::domain::{
    Blog, BlogId, BlogTitle, BlogUpdate, BlogUrl, BlogWithOwner, Error, LoginCredentials, NewBlog,
    NewUser, PasswordHash, User, UserCredentials, UserId, UserWithBlogs, Username,
    verify_password,
};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::token::JwtTokenService;
use backend::server::build_app;

/// Signing secret shared by the app under test and token assertions.
pub const TEST_SECRET: &[u8] = b"integration-test-signing-secret";

#[derive(Clone)]
struct StoredUser {
    user: User,
    password_hash: PasswordHash,
}

#[derive(Default)]
struct StoreState {
    users: Vec<StoredUser>,
    blogs: Vec<Blog>,
}

/// In-memory implementation of the persistence and login ports.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.inner.lock().expect("store mutex poisoned")
    }

    /// Number of stored accounts.
    pub fn user_count(&self) -> usize {
        self.state().users.len()
    }

    /// Number of stored blogs.
    pub fn blog_count(&self) -> usize {
        self.state().blogs.len()
    }

    /// Whether a blog with the given identifier exists.
    pub fn blog_exists(&self, id: &str) -> bool {
        let id = BlogId::new(id).expect("valid blog id");
        self.state().blogs.iter().any(|blog| blog.id() == &id)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.state();
        if state
            .users
            .iter()
            .any(|stored| stored.user.username() == &new_user.username)
        {
            return Err(UserPersistenceError::duplicate_username(
                new_user.username.as_ref(),
            ));
        }
        let user = User::new(
            UserId::random(),
            new_user.username.clone(),
            new_user.name.clone(),
        );
        state.users.push(StoredUser {
            user: user.clone(),
            password_hash: new_user.password_hash.clone(),
        });
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|stored| stored.user.id() == id)
            .map(|stored| stored.user.clone()))
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|stored| stored.user.username() == username)
            .map(|stored| UserCredentials {
                user: stored.user.clone(),
                password_hash: stored.password_hash.clone(),
            }))
    }

    async fn list_with_blogs(&self) -> Result<Vec<UserWithBlogs>, UserPersistenceError> {
        let state = self.state();
        Ok(state
            .users
            .iter()
            .map(|stored| UserWithBlogs {
                user: stored.user.clone(),
                blogs: state
                    .blogs
                    .iter()
                    .filter(|blog| blog.owner() == stored.user.id())
                    .cloned()
                    .collect(),
            })
            .collect())
    }
}

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn list_with_owners(&self) -> Result<Vec<BlogWithOwner>, BlogPersistenceError> {
        let state = self.state();
        state
            .blogs
            .iter()
            .map(|blog| {
                let owner = state
                    .users
                    .iter()
                    .find(|stored| stored.user.id() == blog.owner())
                    .map(|stored| stored.user.clone())
                    .ok_or_else(|| BlogPersistenceError::query("owner row missing"))?;
                Ok(BlogWithOwner {
                    blog: blog.clone(),
                    owner,
                })
            })
            .collect()
    }

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogPersistenceError> {
        Ok(self
            .state()
            .blogs
            .iter()
            .find(|blog| blog.id() == id)
            .cloned())
    }

    async fn create(&self, draft: &NewBlog) -> Result<Blog, BlogPersistenceError> {
        let mut state = self.state();
        if !state
            .users
            .iter()
            .any(|stored| stored.user.id() == &draft.owner)
        {
            return Err(BlogPersistenceError::missing_owner());
        }
        let blog = Blog::new(
            BlogId::random(),
            draft.title.clone(),
            draft.author.clone(),
            draft.url.clone(),
            draft.likes,
            draft.owner,
        );
        state.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn update(
        &self,
        id: &BlogId,
        changes: &BlogUpdate,
    ) -> Result<Option<Blog>, BlogPersistenceError> {
        let mut state = self.state();
        let Some(slot) = state.blogs.iter_mut().find(|blog| blog.id() == id) else {
            return Ok(None);
        };
        let updated = Blog::new(
            *slot.id(),
            changes.title.clone().unwrap_or_else(|| {
                BlogTitle::new(slot.title()).expect("stored title is valid")
            }),
            changes
                .author
                .clone()
                .or_else(|| slot.author().map(str::to_owned)),
            changes
                .url
                .clone()
                .unwrap_or_else(|| BlogUrl::new(slot.url()).expect("stored url is valid")),
            changes.likes.unwrap_or_else(|| slot.likes()),
            *slot.owner(),
        );
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: &BlogId) -> Result<bool, BlogPersistenceError> {
        let mut state = self.state();
        let before = state.blogs.len();
        state.blogs.retain(|blog| blog.id() != id);
        Ok(state.blogs.len() < before)
    }
}

#[async_trait]
impl LoginService for MemoryStore {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = Username::new(credentials.username())
            .map_err(|_| Error::unauthorized("invalid username or password"))?;
        let stored = self
            .find_credentials(&username)
            .await
            .map_err(|err| Error::internal(err.to_string()))?
            .ok_or_else(|| Error::unauthorized("invalid username or password"))?;
        let matches = verify_password(credentials.password(), &stored.password_hash)
            .map_err(|err| Error::internal(err.to_string()))?;
        if matches {
            Ok(stored.user)
        } else {
            Err(Error::unauthorized("invalid username or password"))
        }
    }
}

/// Port bundle over a shared in-memory store.
pub fn test_state(store: &MemoryStore) -> HttpState {
    HttpState::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(JwtTokenService::new(TEST_SECRET)),
    )
}

/// The application under test, wired exactly as in `main`.
pub async fn test_app(
    store: &MemoryStore,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    test::init_service(build_app(test_state(store), health_state)).await
}

/// Issue a JSON request, optionally with a bearer token.
pub async fn send_json<S>(
    app: &S,
    method: actix_web::http::Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = test::TestRequest::default().method(method).uri(uri);
    if let Some(body) = body {
        request = request.set_json(body);
    }
    if let Some(token) = token {
        request = request.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    test::call_service(app, request.to_request()).await
}

/// Register an account through the API and assert success.
pub async fn register<S>(app: &S, username: &str, name: &str, password: &str)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = send_json(
        app,
        actix_web::http::Method::POST,
        "/api/users",
        Some(serde_json::json!({
            "username": username,
            "name": name,
            "password": password,
        })),
        None,
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::CREATED);
}

/// Log in through the API and return the issued token.
pub async fn login_token<S>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = send_json(
        app,
        actix_web::http::Method::POST,
        "/api/login",
        Some(serde_json::json!({
            "username": username,
            "password": password,
        })),
        None,
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    body.get("token")
        .and_then(serde_json::Value::as_str)
        .expect("login response carries a token")
        .to_owned()
}
