//! End-to-end tests for the health route, driven through the full router.
//!
//! Run with: cargo test --test health_api
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, SubsecRound, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vitals::config::AppConfig;
use vitals::routes::create_router;
use vitals::state::AppState;
use vitals::uptime::ProcessClock;

/// Build a router whose `environment` is read from `env_var`.
fn app(env_var: &str) -> Router {
    let mut config = AppConfig::default();
    config.health.environment_var = env_var.to_string();
    app_with(config)
}

fn app_with(config: AppConfig) -> Router {
    create_router(AppState::new(config, ProcessClock::start()))
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, headers, json)
}

fn parse_timestamp(json: &Value) -> DateTime<Utc> {
    let raw = json["timestamp"].as_str().expect("timestamp is a string");
    DateTime::parse_from_rfc3339(raw)
        .expect("timestamp is RFC 3339")
        .with_timezone(&Utc)
}

#[tokio::test]
async fn test_get_health_is_healthy() {
    let start = Utc::now().trunc_subsecs(3);
    let (status, headers, json) = send(app("VITALS_IT_UNSET"), Method::GET, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["uptime"].as_f64().unwrap() >= 0.0);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json.get("environment").is_none());
    assert!(parse_timestamp(&json) >= start);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::CACHE_CONTROL], "no-store, max-age=0");
}

#[tokio::test]
async fn test_environment_reported_when_set() {
    std::env::set_var("VITALS_IT_ENV", "production");
    let (status, _, json) = send(app("VITALS_IT_ENV"), Method::GET, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["environment"], "production");
}

#[tokio::test]
async fn test_uptime_non_decreasing() {
    let app = app("VITALS_IT_UNSET");

    let (_, _, first) = send(app.clone(), Method::GET, "/api/health").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let (_, _, second) = send(app, Method::GET, "/api/health").await;

    let first = first["uptime"].as_f64().unwrap();
    let second = second["uptime"].as_f64().unwrap();
    assert!(second >= first);
}

#[tokio::test]
async fn test_non_get_rejected() {
    for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH, Method::OPTIONS] {
        let start = Utc::now().trunc_subsecs(3);
        let (status, headers, json) = send(app("VITALS_IT_UNSET"), method, "/api/health").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "Method not allowed");
        assert!(parse_timestamp(&json) >= start);
        assert_eq!(headers[header::ALLOW], "GET");
        assert_eq!(headers[header::CACHE_CONTROL], "no-store, max-age=0");
    }
}

#[tokio::test]
async fn test_head_rejected() {
    // HEAD responses carry no body; the error report itself is covered by the handler's unit tests
    let (status, headers, json) = send(app("VITALS_IT_UNSET"), Method::HEAD, "/api/health").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers[header::ALLOW], "GET");
    assert_eq!(json, Value::Null);
}

#[tokio::test]
async fn test_strict_mode_flag_does_not_change_method_check() {
    let mut config = AppConfig::from_toml_str("[build]\nstrict_mode = false").unwrap();
    config.health.environment_var = "VITALS_IT_UNSET".to_string();

    let (status, _, json) = send(app_with(config), Method::POST, "/api/health").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["status"], "error");
}

#[cfg(unix)]
#[tokio::test]
async fn test_report_failure_is_unhealthy() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    std::env::set_var("VITALS_IT_BAD_ENV", OsString::from_vec(vec![0xfe, 0xff]));
    let (status, _, json) = send(app("VITALS_IT_BAD_ENV"), Method::GET, "/api/health").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "unhealthy");
    assert!(!json["error"].as_str().unwrap().is_empty());
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_request_id_header_is_uuid() {
    let (_, headers, _) = send(app("VITALS_IT_UNSET"), Method::GET, "/api/health").await;

    let id = headers["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (status, _, json) = send(app("VITALS_IT_UNSET"), Method::GET, "/health").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"], "Not found");
}
