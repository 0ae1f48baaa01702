#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use ums_api::auth::jwt::{generate_access_token, JwtConfig};
use ums_api::config::ServerConfig;
use ums_api::router::build_app_router;
use ums_api::state::AppState;
use ums_core::academic::AcademicConfig;
use ums_core::permissions::Role;
use ums_db::models::course::CreateCourse;
use ums_db::models::department::CreateDepartment;
use ums_db::models::faculty::CreateFaculty;
use ums_db::repositories::{CourseRepo, DepartmentRepo, FacultyRepo};

/// Semester the test academic calendar reports as current.
pub const CURRENT_SEMESTER: i16 = 3;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

pub fn test_academic_config() -> AcademicConfig {
    AcademicConfig {
        university_name: "Test University".to_string(),
        academic_year: "2025-2026".to_string(),
        current_semester: CURRENT_SEMESTER,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Shares [`build_app_router`] with `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        academic: Arc::new(test_academic_config()),
    };
    build_app_router(state, &config)
}

/// A bearer token for user `1` with the given role.
pub fn token_for(role: Role) -> String {
    generate_access_token(1, role, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
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
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub struct Catalog {
    pub department_id: i64,
    /// Semesters 1, 1 and 3.
    pub courses: Vec<i64>,
    pub faculty: Vec<i64>,
}

/// One department with three courses and three faculty members.
pub async fn seed_catalog(pool: &PgPool) -> Catalog {
    let dept = DepartmentRepo::create(
        pool,
        &CreateDepartment {
            name: "Mathematics".to_string(),
            code: "MA".to_string(),
        },
    )
    .await
    .unwrap();

    let mut faculty = Vec::new();
    for name in ["Emmy", "Kurt", "Sofia"] {
        let f = FacultyRepo::create(
            pool,
            &CreateFaculty {
                full_name: name.to_string(),
                department_id: Some(dept.id),
                designation: "Professor".to_string(),
                joining_date: NaiveDate::from_ymd_opt(2018, 8, 1).unwrap(),
            },
        )
        .await
        .unwrap();
        faculty.push(f.id);
    }

    let mut courses = Vec::new();
    for (code, semester) in [("MA101", 1), ("MA102", 1), ("MA301", 3)] {
        let c = CourseRepo::create(
            pool,
            &CreateCourse {
                name: format!("Course {code}"),
                code: code.to_string(),
                department_id: dept.id,
                faculty_id: None,
                semester,
                credits: 3,
                capacity: None,
            },
        )
        .await
        .unwrap();
        courses.push(c.id);
    }

    Catalog {
        department_id: dept.id,
        courses,
        faculty,
    }
}

/// JSON body for a timetable write.
pub fn entry_json(
    course: i64,
    faculty: i64,
    day: &str,
    start: &str,
    end: &str,
    room: &str,
) -> serde_json::Value {
    serde_json::json!({
        "course_id": course,
        "faculty_id": faculty,
        "day_of_week": day,
        "start_time": start,
        "end_time": end,
        "room": room,
    })
}
