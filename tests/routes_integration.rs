//! HTTP-level integration tests: requests driven through the axum router
//! with `tower::ServiceExt::oneshot`, asserting status codes and JSON bodies.

#![cfg(all(feature = "http-server", feature = "local-repo"))]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use tutormatch::db::repositories::LocalRepository;
use tutormatch::db::repository::FullRepository;
use tutormatch::http::{create_router, AppState};

fn test_app() -> Router {
    let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
    create_router(AppState::new(repo))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "connected");
}

#[tokio::test]
async fn test_register_teacher_and_list() {
    let app = test_app();

    let (status, body) = send(&app, "POST", "/teachers", Some(json!({"name": "kim"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].as_str().unwrap().contains("kim"));

    let (status, body) = send(&app, "GET", "/teachers", None).await;
    assert_eq!(status, StatusCode::OK);
    let teachers = body.as_array().unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0]["name"], "kim");
    assert!(teachers[0]["created_at"].is_string());
}

#[tokio::test]
async fn test_register_without_name_is_400() {
    let app = test_app();
    let (status, body) = send(&app, "POST", "/teachers", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_duplicate_registration_is_400() {
    let app = test_app();
    send(&app, "POST", "/students", Some(json!({"name": "lee"}))).await;
    let (status, body) = send(&app, "POST", "/students", Some(json!({"name": "lee"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("already registered"));
}

#[tokio::test]
async fn test_teacher_schedule_round_trip() {
    let app = test_app();
    send(&app, "POST", "/teachers", Some(json!({"name": "kim"}))).await;

    let (status, _) = send(
        &app,
        "POST",
        "/teacher_schedules",
        Some(json!({
            "teacher": "kim",
            "year_month": "2025-09",
            "schedule": [
                {"day": "Mon", "time": "10:00"},
                {"day": "Wed", "time": "14:00"}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "GET",
        "/teacher_schedules?teacher=kim&year_month=2025-09",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let slots = body.as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["day"], "Mon");
    assert_eq!(slots[0]["time"], "10:00");
}

#[tokio::test]
async fn test_teacher_schedule_save_replaces() {
    let app = test_app();
    for schedule in [
        json!([{"day": "Mon", "time": "10:00"}]),
        json!([{"day": "Fri", "time": "18:00"}]),
    ] {
        send(
            &app,
            "POST",
            "/teacher_schedules",
            Some(json!({
                "teacher": "kim",
                "year_month": "2025-09",
                "schedule": schedule
            })),
        )
        .await;
    }

    let (_, body) = send(
        &app,
        "GET",
        "/teacher_schedules?teacher=kim&year_month=2025-09",
        None,
    )
    .await;
    let slots = body.as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["day"], "Fri");
}

#[tokio::test]
async fn test_malformed_year_month_is_400() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "GET",
        "/teacher_schedules?teacher=kim&year_month=202509",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("YYYY-MM"));
}

#[tokio::test]
async fn test_missing_query_field_is_400() {
    let app = test_app();
    let (status, _) = send(&app, "GET", "/teacher_schedules?teacher=kim", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_student_schedule_404_when_absent() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "GET",
        "/student_schedules?student=lee&year_month=2025-09",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("lee"));
}

#[tokio::test]
async fn test_student_schedule_round_trip() {
    let app = test_app();
    let (status, _) = send(
        &app,
        "POST",
        "/student_schedules",
        Some(json!({
            "student": "lee",
            "year_month": "2025-09",
            "teachers": ["kim", "choi"],
            "schedule": [{"day": "Mon", "time": "10:00"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "GET",
        "/student_schedules?student=lee&year_month=2025-09",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["teachers"], json!(["kim", "choi"]));
    assert_eq!(body["schedule"][0]["day"], "Mon");
}

#[tokio::test]
async fn test_generate_schedule_end_to_end() {
    let app = test_app();
    send(&app, "POST", "/teachers", Some(json!({"name": "kim"}))).await;
    send(&app, "POST", "/students", Some(json!({"name": "lee"}))).await;
    send(
        &app,
        "POST",
        "/teacher_schedules",
        Some(json!({
            "teacher": "kim",
            "year_month": "2025-09",
            "schedule": [{"day": "Mon", "time": "10:00"}]
        })),
    )
    .await;
    send(
        &app,
        "POST",
        "/student_schedules",
        Some(json!({
            "student": "lee",
            "year_month": "2025-09",
            "teachers": ["kim"],
            "schedule": [{"day": "Mon", "time": "10:00"}]
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/generate_schedule",
        Some(json!({"year_month": "2025-09"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created = body.as_array().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["teacher"], "kim");
    assert_eq!(created[0]["student"], "lee");
    assert_eq!(created[0]["day"], "Mon");
    assert_eq!(created[0]["time"], "10:00");

    let (status, body) = send(
        &app,
        "GET",
        "/matched_schedules?teacher=kim&year_month=2025-09",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["student"], "lee");
    assert_eq!(rows[0]["day"], "Mon");
}

#[tokio::test]
async fn test_generate_calendar_mode_produces_dates() {
    let app = test_app();
    send(
        &app,
        "POST",
        "/teacher_schedules",
        Some(json!({
            "teacher": "kim",
            "year_month": "2025-09",
            "schedule": [{"day": "Tue", "time": "10:00"}]
        })),
    )
    .await;
    send(
        &app,
        "POST",
        "/student_schedules",
        Some(json!({
            "student": "lee",
            "year_month": "2025-09",
            "teachers": ["kim"],
            "schedule": [{"day": "Tue", "time": "10:00"}]
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/generate_schedule",
        Some(json!({"year_month": "2025-09", "mode": "calendar"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let days: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["day"].as_i64().unwrap())
        .collect();
    assert_eq!(days, vec![2, 9, 16, 23, 30]);

    // Re-running appends nothing.
    let (_, body) = send(
        &app,
        "POST",
        "/generate_schedule",
        Some(json!({"year_month": "2025-09", "mode": "calendar"})),
    )
    .await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_without_year_month_is_400() {
    let app = test_app();
    let (status, _) = send(&app, "POST", "/generate_schedule", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_matched_schedules_unknown_teacher_404() {
    let app = test_app();
    let (status, _) = send(
        &app,
        "GET",
        "/matched_schedules?teacher=ghost&year_month=2025-09",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
