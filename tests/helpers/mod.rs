#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use teacher_helper::{app, AppConfig, AppState, Claims, CollegeRecord, JwtKeys, MemoryMapper};
use tower::ServiceExt; // not axum::ServiceExt

pub const SECRET: &str = "test-secret";

pub const ALL: &[&str] = &["college:list", "college:add", "college:update", "college:delete"];

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some(SECRET.to_string()),
        "DATABASE_URL" => Some("memory://".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub fn make_test_app() -> Router {
    let state = AppState::new(
        Arc::new(MemoryMapper::<CollegeRecord>::new()),
        JwtKeys::from_secret(SECRET.as_bytes()),
    );
    app(state, &test_config())
}

pub fn token(permissions: &[&str]) -> String {
    let exp = (chrono::Utc::now().timestamp() + 3600) as usize;
    JwtKeys::from_secret(SECRET.as_bytes())
        .issue_token(&Claims {
            sub: "teacher-1".into(),
            exp,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        })
        .expect("sign token")
}

/// Send one request and return the status with the JSON body (Null when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<String>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
    }
    let request = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

/// Send a prebuilt request; for headers `send` does not set.
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Insert a college with full permissions and return its id.
pub async fn seed(app: &Router, body: Value) -> i64 {
    let t = token(ALL);
    let (_, json) = send(app, Method::POST, "/v1/colleges/", Some(&t), Some(body.to_string())).await;
    json["data"]["collegeId"].as_i64().expect("seeded id")
}
