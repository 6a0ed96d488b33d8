//! Query hook: question-answering state over a [`RagBackend`].
//!
//! The hook owns a small state record (loading flag, last answer, last
//! sources, last error). [`QueryHook::query`] drives one request through the
//! backend and folds the outcome into that record; [`QueryHook::clear`]
//! resets the results.
//!
//! Overlapping calls are allowed. Every call that actually sends a request
//! takes a generation number, and only the newest generation's outcome is
//! applied when it settles. An older call that finishes late is dropped.
//!
//! # Example
//! ```no_run
//! use textbook_client::{create_backend, QueryHook, QueryOptions};
//! use textbook_core::ClientConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = create_backend(&ClientConfig::load()?)?;
//! let hook = QueryHook::new(backend);
//!
//! hook.query("What is ROS 2?", QueryOptions::default().with_chapter(3))
//!     .await;
//!
//! let state = hook.state();
//! match state.error {
//!     Some(error) => eprintln!("{}", error),
//!     None => println!("{}", state.answer),
//! }
//! # Ok(())
//! # }
//! ```

use crate::backend::RagBackend;
use crate::types::{QueryOptions, QueryRequest, QueryResponse, Source};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use textbook_core::{AppError, AppResult};

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR: &str = "An unexpected error occurred";

/// Observable state of a [`QueryHook`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryState {
    /// A request is in flight
    pub loading: bool,

    /// Answer from the last successful query
    pub answer: String,

    /// Sources cited by the last successful query
    pub sources: Vec<Source>,

    /// Message from the last failed query
    pub error: Option<String>,
}

/// Question-answering state bound to one backend.
#[derive(Debug)]
pub struct QueryHook {
    backend: Arc<dyn RagBackend>,
    inner: Mutex<Inner>,
}

/// Visible state plus the generation of the newest dispatched call. Both
/// change under the same lock.
#[derive(Debug, Default)]
struct Inner {
    state: QueryState,
    generation: u64,
}

impl QueryHook {
    /// Create a hook with empty state.
    pub fn new(backend: Arc<dyn RagBackend>) -> Self {
        Self {
            backend,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> QueryState {
        self.lock().state.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.loading
    }

    /// Ask `question` with default options.
    pub async fn ask(&self, question: &str) {
        self.query(question, QueryOptions::default()).await
    }

    /// Ask `question` and fold the outcome into the state.
    ///
    /// A blank question is ignored: no request, no state change. Otherwise
    /// `loading` is set and `error` cleared before the request goes out. On
    /// success `answer` and `sources` are replaced; on failure `error` is set
    /// and the results are emptied. `loading` is cleared last.
    pub async fn query(&self, question: &str, options: QueryOptions) {
        if question.trim().is_empty() {
            tracing::debug!("Ignoring blank question");
            return;
        }

        let generation = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.state.loading = true;
            inner.state.error = None;
            inner.generation
        };

        let request = QueryRequest::new(question).with_options(options);
        tracing::debug!(
            generation,
            mode = %request.mode(),
            endpoint = self.backend.endpoint(),
            "Dispatching query"
        );

        let outcome = self.backend.query(&request).await;
        self.settle(generation, outcome);
    }

    /// Reset answer, sources and error. Leaves `loading` and any in-flight
    /// request alone.
    pub fn clear(&self) {
        let mut inner = self.lock();
        let state = &mut inner.state;
        state.answer.clear();
        state.sources.clear();
        state.error = None;
    }

    fn settle(&self, generation: u64, outcome: AppResult<QueryResponse>) {
        let mut inner = self.lock();
        if generation != inner.generation {
            tracing::debug!(
                generation,
                latest = inner.generation,
                "Discarding stale query outcome"
            );
            return;
        }

        let state = &mut inner.state;
        match outcome {
            Ok(response) => {
                tracing::debug!(sources = response.sources.len(), "Query succeeded");
                state.answer = response.answer;
                state.sources = response.sources;
            }
            Err(err) => {
                tracing::warn!("Query failed: {}", err);
                state.error = Some(error_message(&err));
                state.answer.clear();
                state.sources.clear();
            }
        }
        state.loading = false;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn error_message(err: &AppError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    }
}
