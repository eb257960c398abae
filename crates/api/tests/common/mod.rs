#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use lectern_api::auth::jwt::JwtConfig;
use lectern_api::auth::password::hash_password;
use lectern_api::config::ServerConfig;
use lectern_api::router::build_app_router;
use lectern_api::state::AppState;
use lectern_db::models::user::CreateUser;
use lectern_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        min_password_length: 8,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

/// Send `body` verbatim as `application/json`, for bodies `serde_json`
/// would refuse to build.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register through the API and return the access token and user id.
pub async fn register(app: Router, name: &str, role: &str) -> (String, i64) {
    let body = serde_json::json!({
        "name": name,
        "email": format!("{name}@test.com"),
        "password": TEST_PASSWORD,
        "role": role,
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["data"]["accessToken"].as_str().unwrap().to_string(),
        json["data"]["user"]["id"].as_i64().unwrap(),
    )
}

/// Admins cannot self-register; insert one directly and log in.
pub async fn create_admin(pool: &PgPool, app: Router) -> (String, i64) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: "Admin".to_string(),
            email: "admin@test.com".to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: "admin".to_string(),
        },
    )
    .await
    .unwrap();

    let body = serde_json::json!({ "email": "admin@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    (json["data"]["accessToken"].as_str().unwrap().to_string(), user.id)
}

// ---------------------------------------------------------------------------
// Course fixtures
// ---------------------------------------------------------------------------

/// A landing page that satisfies every publish rule except the curriculum.
pub fn complete_landing_page(category_id: i64) -> serde_json::Value {
    serde_json::json!({
        "title": "Rust for Backend Engineers",
        "subtitle": "Ship services with axum and sqlx",
        "description": "x".repeat(200),
        "categoryId": category_id,
        "thumbnailUrl": "https://cdn.example.com/thumb.png",
        "learningObjectives": ["Routing", "Extractors", "Pools", "Migrations"],
        "requirements": ["Basic Rust"],
        "targetAudience": ["Backend developers"],
        "level": "intermediate",
        "language": "en",
    })
}

/// Two sections: a preview video plus a locked article, then a quiz.
pub fn sample_curriculum() -> serde_json::Value {
    serde_json::json!({
        "sections": [
            {
                "title": "Intro",
                "sortOrder": 7,
                "content": [
                    {"contentType": "video", "title": "Welcome", "duration": 100,
                     "isPreview": true,
                     "video": {"url": "https://cdn.example.com/welcome.mp4"},
                     "article": {"body": "stray payload"}},
                    {"contentType": "article", "title": "Setup", "duration": 200,
                     "article": {"body": "Install the toolchain"}}
                ]
            },
            {
                "title": "Basics",
                "content": [
                    {"contentType": "quiz", "title": "Check", "duration": 50,
                     "quiz": {"passingScore": 70, "questions": []}}
                ]
            }
        ]
    })
}

/// Insert a category directly and return its id.
pub async fn create_category(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO categories (name, slug) VALUES ('Development', 'development') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Create a draft with a complete landing page and curriculum, then publish
/// it. Returns the course id.
pub async fn published_course(pool: &PgPool, app: Router, instructor_token: &str) -> i64 {
    let category_id = create_category(pool).await;
    let response = post_json_auth(
        app.clone(),
        "/api/v1/courses",
        instructor_token,
        complete_landing_page(category_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let course_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/courses/{course_id}/curriculum"),
        instructor_token,
        sample_curriculum(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_auth(
        app,
        &format!("/api/v1/courses/{course_id}/publish"),
        instructor_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    course_id
}
