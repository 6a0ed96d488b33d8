//! HTTP transport for the RAG backend.
//!
//! Routes (relative to the configured base URL):
//! - `POST /api/query` answers a question
//! - `GET /health` reports service health
//! - `GET /` describes the service

use crate::backend::RagBackend;
use crate::types::{ErrorBody, HealthStatus, QueryRequest, QueryResponse, ServiceInfo};
use serde::de::DeserializeOwned;
use textbook_core::{AppError, AppResult, ClientConfig};

const QUERY_PATH: &str = "/api/query";
const HEALTH_PATH: &str = "/health";
const INFO_PATH: &str = "/";

/// Longest slice of a non-JSON error body quoted in an error message.
const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// RAG backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Base URL, no trailing slash
    base_url: String,

    /// Full query URL, cached for `endpoint()`
    query_url: String,

    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            query_url: format!("{}{}", base_url, QUERY_PATH),
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a backend for the URL resolved from `config`.
    pub fn from_config(config: &ClientConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self::new(config.api_url()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `GET /health`.
    pub async fn health(&self) -> AppResult<HealthStatus> {
        self.get_json(HEALTH_PATH).await
    }

    /// Fetch `GET /`.
    pub async fn info(&self) -> AppResult<ServiceInfo> {
        self.get_json(INFO_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("Failed to reach {}: {}", url, e)))?;

        read_json(response).await
    }
}

#[async_trait::async_trait]
impl RagBackend for HttpBackend {
    fn endpoint(&self) -> &str {
        &self.query_url
    }

    async fn query(&self, request: &QueryRequest) -> AppResult<QueryResponse> {
        tracing::info!(mode = %request.mode(), "Sending question to backend");
        tracing::debug!("Request: {:?}", request);

        let response = self
            .client
            .post(&self.query_url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("Failed to reach {}: {}", self.query_url, e)))?;

        let parsed: QueryResponse = read_json(response).await?;

        tracing::info!(
            sources = parsed.sources.len(),
            query_time_ms = ?parsed.query_time_ms,
            "Received answer from backend"
        );

        Ok(parsed)
    }
}

/// Check the status, then parse the body as `T`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AppError::Http(format!("Failed to read response body: {}", e)))?;

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "Backend returned an error status");
        return Err(AppError::Status {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| AppError::Parse(e.to_string()))
}

/// Best human-readable explanation in an error body.
///
/// Prefers the backend's error envelope, then a FastAPI `detail` string, then
/// the start of the raw body.
fn error_detail(body: &str) -> Option<String> {
    if let Ok(envelope) = serde_json::from_str::<ErrorBody>(body) {
        return Some(envelope.message);
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return Some(detail.to_string());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(MAX_ERROR_DETAIL_CHARS).collect())
    }
}
