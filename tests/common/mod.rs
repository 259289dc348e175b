#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use sql_bootstrap::Config;

/// In-process stand-in for the backend's health and SQL endpoints.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub received: Arc<Mutex<Vec<String>>>,
    pub health_checks: Arc<AtomicU32>,
    /// Health checks answered with 503 before the first 200.
    pub unhealthy_checks: u32,
    /// Statements containing this text are rejected with 400.
    pub fail_on: Option<&'static str>,
    /// Answer statements with a body that is not JSON.
    pub garbage_response: bool,
}

impl FakeBackend {
    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    pub fn health_checks(&self) -> u32 {
        self.health_checks.load(Ordering::SeqCst)
    }

    /// Serves on an ephemeral port and returns the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/health", get(health))
            .route("/api/sql", post(execute_sql))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend server");
        });

        format!("http://{addr}")
    }
}

async fn health(State(backend): State<FakeBackend>) -> Response {
    let seen = backend.health_checks.fetch_add(1, Ordering::SeqCst);
    if seen < backend.unhealthy_checks {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    Json(json!({ "status": "healthy", "version": "test" })).into_response()
}

async fn execute_sql(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
    let sql = body["sql"].as_str().unwrap_or_default().to_string();
    backend.received.lock().unwrap().push(sql.clone());

    if backend.garbage_response {
        return (StatusCode::OK, "<html>oops</html>").into_response();
    }

    if backend.fail_on.is_some_and(|needle| sql.contains(needle)) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error_code": "SQL_PARSE_ERROR", "message": "syntax error" })),
        )
            .into_response();
    }

    Json(json!({
        "columns": null,
        "rows": null,
        "rows_affected": null,
        "message": "OK",
    }))
    .into_response()
}

pub fn test_config(api_url: &str, db_dir: &Path) -> Config {
    Config {
        api_url: api_url.to_string(),
        db_dir: db_dir.to_path_buf(),
        max_retries: 5,
        retry_interval: Duration::from_millis(20),
        request_timeout: Duration::from_secs(2),
        log_level: "debug".to_string(),
        enable_file_logs: false,
        log_dir: db_dir.join("logs"),
    }
}

/// A base URL nothing is listening on.
pub async fn unused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind free-port listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn write_sql(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("write sql file");
}
