use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HEALTH_PATH: &str = "/api/health";
pub const SQL_PATH: &str = "/api/sql";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct SqlRequest<'a> {
    sql: &'a str,
}

/// Result of one statement, as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SqlResponse {
    pub columns: Option<Vec<String>>,
    pub rows: Option<Vec<Vec<serde_json::Value>>>,
    pub rows_affected: Option<u64>,
    pub message: Option<String>,
}

/// HTTP client for the backend's health and SQL endpoints.
#[derive(Debug, Clone)]
pub struct SqlApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl SqlApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Succeeds only on a `200 OK` from the health endpoint.
    pub async fn check_health(&self) -> Result<(), ApiError> {
        let resp = self.client.get(self.url(HEALTH_PATH)).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::OK {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::HttpStatus { status, body })
    }

    pub async fn execute(&self, sql: &str) -> Result<SqlResponse, ApiError> {
        let resp = self
            .client
            .post(self.url(SQL_PATH))
            .json(&SqlRequest { sql })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::HttpStatus { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
