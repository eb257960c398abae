//! Integration tests for the transactional rating upsert.

use lectern_core::course::LandingPage;
use lectern_core::workflow::{CompletedSteps, CourseStatus};
use lectern_db::models::course::NewCourse;
use lectern_db::models::user::CreateUser;
use lectern_db::repositories::{CourseRepo, RatingRepo, UserRepo};
use sqlx::PgPool;

async fn create_user(pool: &PgPool, email: &str, role: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn create_course(pool: &PgPool, instructor_id: i64) -> i64 {
    CourseRepo::create(
        pool,
        &NewCourse {
            instructor_id,
            landing_page: LandingPage {
                title: "Rated".to_string(),
                ..Default::default()
            },
            status: CourseStatus::Published,
            completed_steps: CompletedSteps::new(),
            sections: Vec::new(),
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rerating_replaces_the_previous_value(pool: PgPool) {
    let instructor = create_user(&pool, "prof@example.com", "instructor").await;
    let a = create_user(&pool, "a@example.com", "student").await;
    let b = create_user(&pool, "b@example.com", "student").await;
    let course = create_course(&pool, instructor).await;

    let first = RatingRepo::upsert(&pool, course, a, 4, None).await.unwrap().unwrap();
    assert_eq!((first.rating_sum, first.total_ratings), (4, 1));
    assert_eq!(first.rating, 4.0);

    let second = RatingRepo::upsert(&pool, course, b, 2, Some("too fast"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.rating, 3.0);

    let third = RatingRepo::upsert(&pool, course, a, 5, Some("better on rewatch"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!((third.rating_sum, third.total_ratings), (7, 2));
    assert_eq!(third.rating, 3.5);

    let stored = CourseRepo::find_by_id(&pool, course).await.unwrap().unwrap();
    assert_eq!(stored.rating_aggregate(), third);

    let row = RatingRepo::find(&pool, course, a).await.unwrap().unwrap();
    assert_eq!(row.value, 5);
    assert_eq!(row.comment.as_deref(), Some("better on rewatch"));

    let listed = RatingRepo::list_for_course(&pool, course, 20, 0).await.unwrap();
    assert_eq!(listed.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_on_missing_course_returns_none(pool: PgPool) {
    let student = create_user(&pool, "lost@example.com", "student").await;
    assert!(RatingRepo::upsert(&pool, 999_999, student, 3, None)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_upserts_keep_counters_consistent(pool: PgPool) {
    let instructor = create_user(&pool, "busy@example.com", "instructor").await;
    let course = create_course(&pool, instructor).await;

    let mut students = Vec::new();
    for i in 0..8 {
        students.push(create_user(&pool, &format!("s{i}@example.com"), "student").await);
    }

    let mut handles = Vec::new();
    for (i, student) in students.iter().copied().enumerate() {
        let pool = pool.clone();
        let value = (i % 5) as i16 + 1;
        handles.push(tokio::spawn(async move {
            RatingRepo::upsert(&pool, course, student, value, None).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let (sum, count): (i64, i64) = sqlx::query_as(
        "SELECT COALESCE(SUM(value), 0)::BIGINT, COUNT(*) FROM course_ratings WHERE course_id = $1",
    )
    .bind(course)
    .fetch_one(&pool)
    .await
    .unwrap();

    let stored = CourseRepo::find_by_id(&pool, course).await.unwrap().unwrap();
    assert_eq!(stored.rating_sum, sum);
    assert_eq!(stored.total_ratings, count);
    assert_eq!(count, 8);
}
