//! HTTP-level tests for the blog endpoints.

mod support;

use actix_web::http::{Method, StatusCode};
use actix_web::test;
use serde_json::{Value, json};

use support::{MemoryStore, login_token, register, send_json, test_app};

fn blog_body(title: &str, likes: Option<i32>) -> Value {
    let mut body = json!({
        "title": title,
        "author": "Blog List API",
        "url": "google.com",
    });
    if let Some(likes) = likes {
        body["likes"] = json!(likes);
    }
    body
}

#[actix_web::test]
async fn blogs_are_returned_as_json_with_ids_and_owners() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;
    register(&app, "root", "Superuser", "sekret").await;
    let token = login_token(&app, "root", "sekret").await;

    let res = send_json(
        &app,
        Method::POST,
        "/api/blogs",
        Some(blog_body("Initial Blog One", Some(60))),
        Some(&token),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = send_json(&app, Method::GET, "/api/blogs", None, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let blogs = body.as_array().expect("array body");
    assert_eq!(blogs.len(), 1);

    let blog = &blogs[0];
    assert!(blog.get("id").and_then(Value::as_str).is_some());
    assert_eq!(blog["title"], "Initial Blog One");
    assert_eq!(blog["likes"], 60);
    let owner = blog.get("user").expect("owner populated");
    assert_eq!(owner["username"], "root");
    assert_eq!(owner["name"], "Superuser");
    assert!(owner.get("id").and_then(Value::as_str).is_some());
}

#[actix_web::test]
async fn creating_without_likes_stores_zero() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;
    register(&app, "root", "Superuser", "sekret").await;
    let token = login_token(&app, "root", "sekret").await;

    let res = send_json(
        &app,
        Method::POST,
        "/api/blogs",
        Some(blog_body("Another blog", None)),
        Some(&token),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["likes"], 0);
}

#[actix_web::test]
async fn creating_without_a_token_is_rejected() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;
    register(&app, "root", "Superuser", "sekret").await;

    let res = send_json(
        &app,
        Method::POST,
        "/api/blogs",
        Some(blog_body("Initial Blog One", Some(60))),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "token missing or invalid");
    assert_eq!(store.blog_count(), 0);
}

#[actix_web::test]
async fn creating_with_a_garbage_token_is_rejected() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;
    register(&app, "root", "Superuser", "sekret").await;

    let res = send_json(
        &app,
        Method::POST,
        "/api/blogs",
        Some(blog_body("Initial Blog One", Some(60))),
        Some("aaaa.bbbb.cccc"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.blog_count(), 0);
}

#[actix_web::test]
async fn creating_without_required_fields_is_a_client_error() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;
    register(&app, "root", "Superuser", "sekret").await;
    let token = login_token(&app, "root", "sekret").await;

    let res = send_json(
        &app,
        Method::POST,
        "/api/blogs",
        Some(json!({ "author": "Blog List API", "url": "google.com" })),
        Some(&token),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "missing required field: title");
    assert_eq!(store.blog_count(), 0);
}

#[actix_web::test]
async fn deleting_someone_elses_blog_is_rejected() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;
    register(&app, "root", "Superuser", "sekret").await;
    register(&app, "pansuola", "Panu Valtanen", "salainen").await;
    let owner_token = login_token(&app, "root", "sekret").await;
    let other_token = login_token(&app, "pansuola", "salainen").await;

    let res = send_json(
        &app,
        Method::POST,
        "/api/blogs",
        Some(blog_body("Initial Blog One", Some(60))),
        Some(&owner_token),
    )
    .await;
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_str().expect("created id");

    let res = send_json(
        &app,
        Method::DELETE,
        &format!("/api/blogs/{id}"),
        None,
        Some(&other_token),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "removing other peoples blogs is not allowed");
    assert!(store.blog_exists(id));
}

#[actix_web::test]
async fn the_owner_can_delete_their_blog() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;
    register(&app, "root", "Superuser", "sekret").await;
    let token = login_token(&app, "root", "sekret").await;

    let res = send_json(
        &app,
        Method::POST,
        "/api/blogs",
        Some(blog_body("Initial Blog One", Some(60))),
        Some(&token),
    )
    .await;
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_str().expect("created id");
    assert_eq!(store.blog_count(), 1);

    let res = send_json(
        &app,
        Method::DELETE,
        &format!("/api/blogs/{id}"),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.blog_count(), 0);
}

#[actix_web::test]
async fn deleting_without_a_token_is_rejected() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;
    register(&app, "root", "Superuser", "sekret").await;
    let token = login_token(&app, "root", "sekret").await;

    let res = send_json(
        &app,
        Method::POST,
        "/api/blogs",
        Some(blog_body("Initial Blog One", Some(60))),
        Some(&token),
    )
    .await;
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_str().expect("created id");

    let res = send_json(&app, Method::DELETE, &format!("/api/blogs/{id}"), None, None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(store.blog_exists(id));
}

#[actix_web::test]
async fn updates_require_no_token_and_replace_fields() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;
    register(&app, "root", "Superuser", "sekret").await;
    let token = login_token(&app, "root", "sekret").await;

    let res = send_json(
        &app,
        Method::POST,
        "/api/blogs",
        Some(blog_body("Initial Blog One", Some(60))),
        Some(&token),
    )
    .await;
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_str().expect("created id");

    let res = send_json(
        &app,
        Method::PUT,
        &format!("/api/blogs/{id}"),
        Some(json!({ "likes": 61 })),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["likes"], 61);
    // Untouched fields survive the partial update.
    assert_eq!(body["title"], "Initial Blog One");
}

#[actix_web::test]
async fn updating_an_unknown_blog_is_not_found() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;

    let res = send_json(
        &app,
        Method::PUT,
        "/api/blogs/3fa85f64-5717-4562-b3fc-2c963f66afa6",
        Some(json!({ "likes": 1 })),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_blog_ids_are_a_client_error() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;

    let res = send_json(
        &app,
        Method::PUT,
        "/api/blogs/5a422a851b54a676234d17f7",
        Some(json!({ "likes": 1 })),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn error_responses_carry_a_trace_id_header() {
    let store = MemoryStore::new();
    let app = test_app(&store).await;

    let res = send_json(
        &app,
        Method::POST,
        "/api/blogs",
        Some(blog_body("Initial Blog One", None)),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().get("trace-id").is_some());
}
