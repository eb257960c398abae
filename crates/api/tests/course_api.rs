//! Course authoring workflow: drafts, landing page, publish and unpublish,
//! ownership checks, and the public catalog.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, complete_landing_page, create_category, delete_auth, get, get_auth, post_auth,
    post_json_auth, put_json_auth, register, sample_curriculum,
};
use sqlx::PgPool;

async fn create_draft(app: axum::Router, token: &str, title: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/courses",
        token,
        serde_json::json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn a_title_is_enough_for_a_draft(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, instructor_id) = register(app.clone(), "teach", "instructor").await;

    let response = post_json_auth(
        app,
        "/api/v1/courses",
        &token,
        serde_json::json!({ "title": "  Rust 101  " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Rust 101");
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["instructorId"], instructor_id);
    assert_eq!(json["data"]["completedSteps"], serde_json::json!(["landing-page"]));
    assert_eq!(json["data"]["totalLectures"], 0);
    assert!(json["data"].get("sections").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_title_and_students_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (instructor, _) = register(app.clone(), "teach", "instructor").await;
    let (student, _) = register(app.clone(), "learn", "student").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/courses",
        &instructor,
        serde_json::json!({ "title": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/v1/courses",
        &student,
        serde_json::json!({ "title": "Mine" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn creating_as_published_requires_a_complete_course(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = register(app.clone(), "teach", "instructor").await;
    let category_id = create_category(&pool).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/courses",
        &token,
        serde_json::json!({ "title": "Half done", "status": "published" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut body = complete_landing_page(category_id);
    body["status"] = "published".into();
    body["sections"] = sample_curriculum()["sections"].clone();
    let response = post_json_auth(app, "/api/v1/courses", &token, body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "published");
    assert!(json["data"]["publishedAt"].is_string());
    assert_eq!(json["data"]["totalDuration"], 350);
    assert_eq!(
        json["data"]["completedSteps"],
        serde_json::json!(["landing-page", "curriculum", "publish"])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn publish_lists_every_violation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register(app.clone(), "teach", "instructor").await;
    let course_id = create_draft(app.clone(), &token, "Bare").await;

    let response = post_auth(app, &format!("/api/v1/courses/{course_id}/publish"), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let errors: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert_eq!(errors.len(), 8);
    assert!(errors.contains(&"Course subtitle is required"));
    assert!(errors.contains(&"Course must have at least one section with content"));
    assert!(!errors.contains(&"Course title is required"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn publish_then_unpublish_keeps_content(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = register(app.clone(), "teach", "instructor").await;
    let course_id = common::published_course(&pool, app.clone(), &token).await;

    let response = get(app.clone(), &format!("/api/v1/courses/{course_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let published = body_json(response).await;
    assert_eq!(published["data"]["status"], "published");

    let response = post_auth(
        app.clone(),
        &format!("/api/v1/courses/{course_id}/unpublish"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["totalLectures"], 3);
    assert_eq!(json["data"]["subtitle"], published["data"]["subtitle"]);
    assert_eq!(json["data"]["publishedAt"], published["data"]["publishedAt"]);
    assert_eq!(
        json["data"]["completedSteps"],
        serde_json::json!(["landing-page", "curriculum"])
    );

    // Hidden from the public again.
    let response = get(app, &format!("/api/v1/courses/{course_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn drafts_are_hidden_and_edits_need_ownership(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _) = register(app.clone(), "owner", "instructor").await;
    let (other, _) = register(app.clone(), "other", "instructor").await;
    let (student, _) = register(app.clone(), "learn", "student").await;
    let course_id = create_draft(app.clone(), &owner, "Secret").await;
    let uri = format!("/api/v1/courses/{course_id}");

    assert_eq!(get(app.clone(), &uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        get_auth(app.clone(), &uri, &student).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(get_auth(app.clone(), &uri, &owner).await.status(), StatusCode::OK);

    let response = put_json_auth(
        app.clone(),
        &format!("{uri}/landing-page"),
        &other,
        serde_json::json!({ "subtitle": "Hijacked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        get_auth(app, &uri, &owner).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn landing_page_update_is_partial(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register(app.clone(), "teach", "instructor").await;
    let course_id = create_draft(app.clone(), &token, "Original").await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/courses/{course_id}/landing-page"),
        &token,
        serde_json::json!({ "subtitle": "Now with a subtitle", "level": "beginner" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Original");
    assert_eq!(json["data"]["subtitle"], "Now with a subtitle");
    assert_eq!(json["data"]["level"], "beginner");

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/courses/{course_id}/landing-page"),
        &token,
        serde_json::json!({ "level": "wizard" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        &format!("/api/v1/courses/{course_id}/landing-page"),
        &token,
        serde_json::json!({ "categoryId": 9999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn published_course_cannot_lose_required_fields(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = register(app.clone(), "teach", "instructor").await;
    let course_id = common::published_course(&pool, app.clone(), &token).await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/courses/{course_id}/landing-page"),
        &token,
        serde_json::json!({ "subtitle": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalog_lists_published_courses_only(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = register(app.clone(), "teach", "instructor").await;
    let published_id = common::published_course(&pool, app.clone(), &token).await;
    create_draft(app.clone(), &token, "Unfinished").await;

    let response = get(app.clone(), "/api/v1/courses").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let courses = json["data"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["id"], published_id);
    assert_eq!(courses[0]["instructorName"], "teach");

    let response = get(app.clone(), "/api/v1/courses?search=backend&level=intermediate").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = get(app.clone(), "/api/v1/courses?search=cobol").await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());

    let response = get_auth(app, "/api/v1/instructor/courses", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}
