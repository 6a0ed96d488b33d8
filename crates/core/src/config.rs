//! Configuration management for the textbook QA client.
//!
//! Configuration is resolved once at startup and then passed explicitly to
//! whatever needs it. Sources, lowest precedence first:
//! - Built-in defaults (per deployment environment)
//! - Config file (`--config`, `TEXTBOOK_CONFIG`, or `./textbook.yaml`)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Backend URL used during local development (the mock server's default port).
pub const DEVELOPMENT_API_URL: &str = "http://localhost:8000";

/// Backend URL used by production deployments.
pub const PRODUCTION_API_URL: &str = "https://api.physical-ai-textbook.app";

/// Config file picked up from the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "textbook.yaml";

/// Deployment environment, which selects the default backend URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse an environment name. Accepts the usual short forms.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Default backend URL for this environment.
    pub fn default_api_url(&self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT_API_URL,
            Self::Production => PRODUCTION_API_URL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Active deployment environment
    pub environment: Environment,

    /// Explicit backend URL; wins over the environment default
    pub api_url: Option<String>,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    api: Option<ApiSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiSection {
    url: Option<String>,
    environment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            api_url: None,
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment and config file.
    ///
    /// Environment variables:
    /// - `TEXTBOOK_CONFIG`: Path to config file
    /// - `TEXTBOOK_ENV`: `development` or `production`
    /// - `TEXTBOOK_API_URL`: Backend URL override
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use textbook_core::config::ClientConfig;
    ///
    /// let config = ClientConfig::load().expect("Failed to load config");
    /// println!("Backend: {}", config.api_url());
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(config_file) = lookup("TEXTBOOK_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        match config.config_file.clone() {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file does not exist: {:?}",
                        path
                    )));
                }
                config = config.merge_yaml(&path)?;
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    config = config.merge_yaml(&path)?;
                }
            }
        }

        // Environment variables override YAML config
        if let Some(env) = lookup("TEXTBOOK_ENV") {
            config.environment = parse_environment(&env)?;
        }

        if let Some(url) = lookup("TEXTBOOK_API_URL") {
            if !url.trim().is_empty() {
                config.api_url = Some(url);
            }
        }

        if let Some(level) = lookup("RUST_LOG") {
            config.log_level = Some(level);
        }

        if lookup("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(api) = config_file.api {
            if let Some(env) = api.environment {
                result.environment = parse_environment(&env)?;
            }
            if let Some(url) = api.url {
                result.api_url = Some(url);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over everything else.
    pub fn with_overrides(
        mut self,
        environment: Option<Environment>,
        api_url: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(environment) = environment {
            self.environment = environment;
        }

        if let Some(api_url) = api_url {
            self.api_url = Some(api_url);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolved backend base URL, without a trailing slash.
    pub fn api_url(&self) -> String {
        let url = self
            .api_url
            .as_deref()
            .unwrap_or_else(|| self.environment.default_api_url());
        url.trim().trim_end_matches('/').to_string()
    }

    /// Validate the resolved backend URL.
    pub fn validate(&self) -> AppResult<()> {
        let url = self.api_url();
        let host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .ok_or_else(|| {
                AppError::Config(format!(
                    "Backend URL must start with http:// or https://, got '{}'",
                    url
                ))
            })?;
        if host.is_empty() || host.starts_with('/') {
            return Err(AppError::Config(format!("Backend URL has no host: '{}'", url)));
        }
        Ok(())
    }
}

fn parse_environment(value: &str) -> AppResult<Environment> {
    Environment::parse(value).ok_or_else(|| {
        AppError::Config(format!(
            "Unknown environment: {}. Supported: development, production",
            value
        ))
    })
}
