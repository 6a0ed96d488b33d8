//! Command handlers for the textbook QA CLI.

pub mod ask;
pub mod health;
pub mod info;

pub use ask::AskCommand;
pub use health::HealthCommand;
pub use info::InfoCommand;
