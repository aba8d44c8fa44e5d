pub mod config;
pub mod core;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod utils;

// Re-export commonly used items for convenience
pub use crate::config::ServerConfig;
pub use crate::core::llm::{LlmClient, LlmConfig, LlmError};
pub use crate::errors::{AppError, AppResult};
pub use crate::state::AppState;
