//! Backend abstraction and factory.
//!
//! The query hook talks to the RAG service only through [`RagBackend`], so
//! the HTTP transport can be swapped for an in-process fake.

use crate::http::HttpBackend;
use crate::types::{QueryRequest, QueryResponse};
use std::sync::Arc;
use textbook_core::{AppResult, ClientConfig};

/// A question-answering backend.
#[async_trait::async_trait]
pub trait RagBackend: Send + Sync + std::fmt::Debug {
    /// Where requests go, for logging.
    fn endpoint(&self) -> &str;

    /// Ask one question and wait for the answer.
    ///
    /// Non-success statuses, transport failures and unparseable bodies all
    /// come back as `Err`.
    async fn query(&self, request: &QueryRequest) -> AppResult<QueryResponse>;
}

/// Create the HTTP backend for the resolved configuration.
///
/// # Errors
/// Returns a configuration error if the backend URL is not an http(s) URL.
pub fn create_backend(config: &ClientConfig) -> AppResult<Arc<dyn RagBackend>> {
    let backend = HttpBackend::from_config(config)?;
    tracing::debug!("Using backend at {}", backend.endpoint());
    Ok(Arc::new(backend))
}
