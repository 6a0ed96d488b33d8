//! Ask command handler.
//!
//! Sends one question through the query hook and prints the answer with
//! its cited sources.

use clap::Args;
use std::fmt::Write as _;
use textbook_client::{create_backend, PageWrapper, QueryHook, QueryOptions, QueryState};
use textbook_core::{config::ClientConfig, AppError, AppResult};

/// Ask a question about the textbook
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Selected text to ground the answer in
    #[arg(long)]
    pub context: Option<String>,

    /// Answer only from --context, skipping book-wide retrieval
    #[arg(long, requires = "context")]
    pub context_only: bool,

    /// Restrict retrieval to one chapter
    #[arg(long)]
    pub chapter: Option<i64>,

    /// Number of chunks to retrieve
    #[arg(long)]
    pub top_k: Option<u32>,

    /// Output the resulting state as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &ClientConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        if self.question.trim().is_empty() {
            tracing::debug!("Blank question, nothing to ask");
            return Ok(());
        }

        let backend = create_backend(config)?;
        let hook = QueryHook::new(backend);

        hook.query(&self.question, self.options()).await;
        let state = hook.state();

        if self.json {
            let json = serde_json::to_string_pretty(&state)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", PageWrapper::new(json));
        } else if state.error.is_none() {
            println!("{}", PageWrapper::new(render_answer(&state)));
        }

        match state.error {
            Some(error) => Err(AppError::Other(error)),
            None => Ok(()),
        }
    }

    fn options(&self) -> QueryOptions {
        let mut options = QueryOptions::default();
        if let Some(ref context) = self.context {
            options = options.with_context(context.clone());
        }
        if self.context_only {
            options = options.context_only();
        }
        if let Some(chapter) = self.chapter {
            options = options.with_chapter(chapter);
        }
        if let Some(top_k) = self.top_k {
            options = options.with_top_k(top_k);
        }
        options
    }
}

/// Plain-text rendering of an answer and its sources.
fn render_answer(state: &QueryState) -> String {
    let mut out = state.answer.trim_end().to_string();

    if !state.sources.is_empty() {
        out.push_str("\n\nSources:");
        for (i, source) in state.sources.iter().enumerate() {
            let _ = write!(
                out,
                "\n  [{}] Chapter {}, Section {}: {} (relevance {:.2})",
                i + 1,
                source.chapter_id,
                source.section_id,
                source.section_title,
                source.relevance_score
            );
            if !source.preview_text.trim().is_empty() {
                let _ = write!(out, "\n      {}", source.preview_text.trim());
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use textbook_client::Source;

    fn command(question: &str) -> AskCommand {
        AskCommand {
            question: question.to_string(),
            context: None,
            context_only: false,
            chapter: None,
            top_k: None,
            json: false,
        }
    }

    #[test]
    fn test_default_options() {
        assert_eq!(command("q").options(), QueryOptions::default());
    }

    #[test]
    fn test_options_from_flags() {
        let mut cmd = command("q");
        cmd.context = Some("selected".to_string());
        cmd.context_only = true;
        cmd.chapter = Some(2);
        cmd.top_k = Some(8);

        let options = cmd.options();
        assert_eq!(options.context, "selected");
        assert!(options.use_context_only);
        assert_eq!(options.chapter_id, Some(2));
        assert_eq!(options.top_k, Some(8));
    }

    #[test]
    fn test_render_answer_without_sources() {
        let state = QueryState {
            answer: "42\n".to_string(),
            ..Default::default()
        };
        assert_eq!(render_answer(&state), "42");
    }

    #[test]
    fn test_render_answer_with_sources() {
        let state = QueryState {
            answer: "VLA systems combine vision, language and action.".to_string(),
            sources: vec![Source {
                chunk_id: "ch5-vla-001".to_string(),
                chapter_id: 5,
                section_id: "5.1".to_string(),
                section_title: "Vision-Language-Action Systems".to_string(),
                preview_text: "VLA systems represent the convergence...".to_string(),
                relevance_score: 0.94,
            }],
            ..Default::default()
        };

        let rendered = render_answer(&state);
        assert!(rendered.contains("Sources:"));
        assert!(rendered
            .contains("[1] Chapter 5, Section 5.1: Vision-Language-Action Systems (relevance 0.94)"));
        assert!(rendered.contains("VLA systems represent the convergence..."));
    }

    #[tokio::test]
    async fn test_blank_question_skips_backend() {
        let mut config = ClientConfig::default();
        // Unusable URL: reaching the backend would fail
        config.api_url = Some("not a url".to_string());

        assert!(command("   ").execute(&config).await.is_ok());
    }
}
