//! Course notes, categories and instructor profiles.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_auth, post_json_auth, register};
use sqlx::PgPool;

fn note_body() -> serde_json::Value {
    serde_json::json!({
        "title": "Slides",
        "topic": "Week 1",
        "description": "Deck used in the intro lecture",
        "file": { "url": "https://cdn.example.com/slides.pdf", "name": "slides.pdf" },
        "isDownloadable": true,
        "sectionIndex": 0,
        "contentIndex": 1
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notes_are_added_listed_and_removed(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (instructor, _) = register(app.clone(), "teach", "instructor").await;
    let (student, _) = register(app.clone(), "learn", "student").await;
    let course_id = common::published_course(&pool, app.clone(), &instructor).await;
    let uri = format!("/api/v1/courses/{course_id}/notes");

    let response = post_json_auth(app.clone(), &uri, &instructor, note_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let note = body_json(response).await["data"].clone();
    let note_id = note["id"].as_str().unwrap().to_string();
    assert_eq!(note["title"], "Slides");
    assert_eq!(note["isDownloadable"], true);

    // Students need an enrollment to read notes.
    let response = get_auth(app.clone(), &uri, &student).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    post_auth(
        app.clone(),
        &format!("/api/v1/courses/{course_id}/enroll"),
        &student,
    )
    .await;
    let response = get_auth(app.clone(), &uri, &student).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    // Students cannot add or remove.
    let response = post_json_auth(app.clone(), &uri, &student, note_body()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &format!("{uri}/{note_id}"), &instructor).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(app.clone(), &format!("{uri}/{note_id}"), &instructor).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, &uri, &instructor).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notes_need_title_and_topic(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (instructor, _) = register(app.clone(), "teach", "instructor").await;
    let response = post_json_auth(
        app.clone(),
        "/api/v1/courses",
        &instructor,
        serde_json::json!({ "title": "Draft" }),
    )
    .await;
    let course_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/v1/courses/{course_id}/notes"),
        &instructor,
        serde_json::json!({ "title": "", "topic": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errors"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn categories_are_admin_managed(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (admin, _) = common::create_admin(&pool, app.clone()).await;
    let (instructor, _) = register(app.clone(), "teach", "instructor").await;
    let body = serde_json::json!({ "name": "Design", "slug": " Design " });

    let response =
        post_json_auth(app.clone(), "/api/v1/categories", &instructor, body.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(app.clone(), "/api/v1/categories", &admin, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["slug"], "design");

    let response = post_json_auth(app.clone(), "/api/v1/categories", &admin, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(app, "/api/v1/categories").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn instructor_profile_aggregates_published_courses(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (instructor, instructor_id) = register(app.clone(), "teach", "instructor").await;
    let (student, student_id) = register(app.clone(), "learn", "student").await;
    let course_id = common::published_course(&pool, app.clone(), &instructor).await;
    post_auth(
        app.clone(),
        &format!("/api/v1/courses/{course_id}/enroll"),
        &student,
    )
    .await;
    post_json_auth(
        app.clone(),
        &format!("/api/v1/courses/{course_id}/rate"),
        &student,
        serde_json::json!({ "value": 5 }),
    )
    .await;

    let response = get(app.clone(), &format!("/api/v1/instructors/{instructor_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "teach");
    assert_eq!(json["data"]["publishedCourses"], 1);
    assert_eq!(json["data"]["totalEnrollments"], 1);
    assert_eq!(json["data"]["totalRatings"], 1);
    assert_eq!(json["data"]["averageRating"], 5.0);

    let response = get(app, &format!("/api/v1/instructors/{student_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
