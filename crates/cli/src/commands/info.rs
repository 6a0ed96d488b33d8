//! Info command handler.

use clap::Args;
use textbook_client::{HttpBackend, PageWrapper};
use textbook_core::{config::ClientConfig, AppError, AppResult};

/// Show what the backend says about itself
#[derive(Args, Debug)]
pub struct InfoCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl InfoCommand {
    pub async fn execute(&self, config: &ClientConfig) -> AppResult<()> {
        tracing::info!("Executing info command");

        let info = HttpBackend::from_config(config)?.info().await?;

        if self.json {
            let json = serde_json::to_string_pretty(&info)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", PageWrapper::new(json));
            return Ok(());
        }

        let mut lines = vec![
            format!("{} v{}", info.name, info.version),
            format!("status: {}", info.status),
        ];
        if let Some(mode) = info.mode {
            lines.push(format!("mode: {}", mode));
        }
        if let Some(message) = info.message {
            lines.push(message);
        }
        println!("{}", PageWrapper::new(lines.join("\n")));

        Ok(())
    }
}
