//! Client library for the textbook question-answering backend.
//!
//! - [`QueryHook`]: question/answer state driven by a [`RagBackend`]
//! - [`HttpBackend`]: the backend reached over HTTP
//! - [`PageWrapper`]: pass-through container for rendered pages
//!
//! # Example
//! ```no_run
//! use textbook_client::{HttpBackend, QueryHook};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let hook = QueryHook::new(Arc::new(HttpBackend::new("http://localhost:8000")));
//! hook.ask("What is Physical AI?").await;
//! println!("{}", hook.state().answer);
//! # }
//! ```

pub mod backend;
pub mod http;
pub mod page;
pub mod query;
pub mod types;

#[cfg(test)]
mod testing;

pub use backend::{create_backend, RagBackend};
pub use http::HttpBackend;
pub use page::{render_page, PageWrapper};
pub use query::{QueryHook, QueryState, FALLBACK_ERROR};
pub use types::{
    Complexity, EducationalMetadata, ErrorBody, HealthStatus, QueryMode, QueryOptions,
    QueryRequest, QueryResponse, QuestionType, ServiceInfo, Source,
};
