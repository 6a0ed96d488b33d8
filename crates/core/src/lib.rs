//! Textbook QA Core Library
//!
//! Foundational pieces shared by the client library and the CLI:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration and backend URL resolution

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ClientConfig, Environment};
pub use error::{AppError, AppResult};
