//! Wire types exchanged with the RAG backend.

use serde::{Deserialize, Serialize};

/// Query request body for `POST /api/query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The learner's question
    pub question: String,

    /// Selected text to ground the answer in (empty when none)
    #[serde(default)]
    pub context: String,

    /// Answer only from `context`, skipping book-wide retrieval
    #[serde(default)]
    pub use_context_only: bool,

    /// Restrict retrieval to one chapter. Always serialized; `null` means
    /// no chapter scoping.
    #[serde(default)]
    pub chapter_id: Option<i64>,

    /// Number of chunks to retrieve; the backend picks when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl QueryRequest {
    /// Create a request with default options.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            context: String::new(),
            use_context_only: false,
            chapter_id: None,
            top_k: None,
        }
    }

    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.context = options.context;
        self.use_context_only = options.use_context_only;
        self.chapter_id = options.chapter_id;
        self.top_k = options.top_k;
        self
    }

    /// Retrieval mode the backend will use for this request.
    pub fn mode(&self) -> QueryMode {
        if self.use_context_only {
            QueryMode::SelectedTextOnly
        } else if self.chapter_id.is_some() {
            QueryMode::ChapterAware
        } else {
            QueryMode::BookWide
        }
    }
}

/// Optional arguments to a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub context: String,
    pub use_context_only: bool,
    pub chapter_id: Option<i64>,
    pub top_k: Option<u32>,
}

impl QueryOptions {
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn context_only(mut self) -> Self {
        self.use_context_only = true;
        self
    }

    pub fn with_chapter(mut self, chapter_id: i64) -> Self {
        self.chapter_id = Some(chapter_id);
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }
}

/// How the backend scopes retrieval for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    BookWide,
    ChapterAware,
    SelectedTextOnly,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookWide => "book-wide",
            Self::ChapterAware => "chapter-aware",
            Self::SelectedTextOnly => "selected-text-only",
        }
    }
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A retrieved text chunk cited by an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub chunk_id: String,
    pub chapter_id: i64,
    pub section_id: String,
    pub section_title: String,
    pub preview_text: String,
    pub relevance_score: f64,
}

/// Kind of question, as classified by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Definition,
    Explanation,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

/// Advisory answer-shaping hints. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationalMetadata {
    pub question_type: QuestionType,
    pub complexity: Complexity,
    pub estimated_word_count: String,
    pub needs_structure: bool,
}

/// Response body of `POST /api/query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub answer: String,

    /// Cited chunks; an absent field reads as no sources
    #[serde(default)]
    pub sources: Vec<Source>,

    #[serde(default)]
    pub chapter_id: Option<i64>,

    #[serde(default)]
    pub query_time_ms: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub educational_metadata: Option<EducationalMetadata>,
}

/// Response body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "healthy" or "degraded"
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Response body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The backend's standard error envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error type, e.g. "validation_error" or "rate_limit"
    pub error: String,

    /// Human-readable message
    pub message: String,

    #[serde(default)]
    pub details: serde_json::Value,
}
