//! Common test utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use roster_server::{config::Config, routes, state::AppState};
use roster_types::{Directory, Employee, SessionState};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Build the router over a fresh state with a throwaway static dir.
pub fn create_test_app() -> (Router, Arc<AppState>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let static_dir = temp_dir.path().join("static");
    std::fs::create_dir_all(&static_dir).unwrap();

    let config = Config {
        port: 0,
        host: "127.0.0.1".to_string(),
        static_dir,
        topic: "test_sync".to_string(),
        ..Config::default()
    };

    let state = Arc::new(AppState::new(config));
    let app = routes::router(state.clone());
    (app, state, temp_dir)
}

pub fn employee(unit: &str, serial: &str, name: &str, title: &str) -> Employee {
    Employee {
        unit: unit.to_string(),
        serial: serial.to_string(),
        full_name: name.to_string(),
        job_title: title.to_string(),
    }
}

/// Two units, three people.
pub fn sample_directory() -> Directory {
    Directory {
        units: vec!["Phòng Tổng hợp".into(), "Kiểm toán Nhà nước khu vực I".into()],
        employees: vec![
            employee("Phòng Tổng hợp", "1", "Nguyễn Văn An", "Trưởng phòng"),
            employee("Phòng Tổng hợp", "2", "Trần Thị Bình", ""),
            employee("Kiểm toán Nhà nước khu vực I", "1", "Lê Văn Cường", "Kiểm toán viên"),
        ],
    }
}

/// Load the sample directory straight into the control session.
pub async fn load_sample(state: &AppState) {
    let mut session = state.session.lock().await;
    assert!(session.load_directory(sample_directory()));
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert success and decode the returned session state.
pub async fn session_state(response: Response<Body>) -> SessionState {
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_value(body_json(response).await).unwrap()
}
