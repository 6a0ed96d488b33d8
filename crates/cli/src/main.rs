//! Textbook QA CLI
//!
//! Ask the textbook's question-answering backend from the terminal.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{AskCommand, HealthCommand, InfoCommand};
use textbook_core::{config::ClientConfig, logging, Environment};

/// Textbook QA CLI - ask questions about the textbook
#[derive(Parser, Debug)]
#[command(name = "textbook")]
#[command(about = "Ask the textbook's question-answering backend", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides the environment default)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Deployment environment (development, production)
    #[arg(long = "env", global = true, value_parser = parse_environment)]
    environment: Option<Environment>,

    /// Path to config file
    #[arg(short, long, global = true, env = "TEXTBOOK_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question
    Ask(AskCommand),

    /// Check backend health
    Health(HealthCommand),

    /// Show backend service information
    Info(InfoCommand),
}

fn parse_environment(value: &str) -> Result<Environment, String> {
    Environment::parse(value)
        .ok_or_else(|| format!("unknown environment '{}': use development or production", value))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(
            cli.environment,
            cli.api_url,
            cli.log_level,
            cli.verbose,
            cli.no_color,
        );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Textbook QA CLI starting");
    tracing::debug!("Environment: {}", config.environment.as_str());
    tracing::debug!("Backend: {}", config.api_url());

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Health(_) => "health",
        Commands::Info(_) => "info",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Health(cmd) => cmd.execute(&config).await,
        Commands::Info(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    Ok(result?)
}

/// Load configuration, preferring an explicit `--config` path.
fn load_config(config_file: Option<&std::path::Path>) -> textbook_core::AppResult<ClientConfig> {
    match config_file {
        Some(path) => {
            let path = path.to_string_lossy().into_owned();
            ClientConfig::from_lookup(|key| match key {
                "TEXTBOOK_CONFIG" => Some(path.clone()),
                _ => std::env::var(key).ok(),
            })
        }
        None => ClientConfig::load(),
    }
}
