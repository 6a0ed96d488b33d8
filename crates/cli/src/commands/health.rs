//! Health command handler.

use clap::Args;
use textbook_client::{HttpBackend, PageWrapper};
use textbook_core::{config::ClientConfig, AppError, AppResult};

/// Check that the backend is up
#[derive(Args, Debug)]
pub struct HealthCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl HealthCommand {
    /// Execute the health command. Fails when the backend is unreachable or
    /// reports anything other than healthy.
    pub async fn execute(&self, config: &ClientConfig) -> AppResult<()> {
        tracing::info!("Executing health command");

        let backend = HttpBackend::from_config(config)?;
        let health = backend.health().await?;

        if self.json {
            let json = serde_json::to_string_pretty(&health)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", PageWrapper::new(json));
        } else {
            let mut line = format!("{}: {}", backend.base_url(), health.status);
            if let Some(ref mode) = health.mode {
                line.push_str(&format!(" (mode: {})", mode));
            }
            println!("{}", PageWrapper::new(line));
        }

        if health.is_healthy() {
            Ok(())
        } else {
            Err(AppError::Other(format!(
                "Backend reports status '{}'",
                health.status
            )))
        }
    }
}
