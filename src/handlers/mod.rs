//! HTTP and WebSocket request handlers
//!
//! - `api` - Health check endpoint
//! - `session` - Per-call WebSocket session (the Retell custom LLM protocol)
//! - `webhook` - Call lifecycle webhook endpoint

pub mod api;
pub mod session;
pub mod webhook;

// Re-export commonly used handlers for convenient access
pub use session::session_handler;
pub use webhook::webhook_handler;
