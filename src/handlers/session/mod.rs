//! Per-call WebSocket session handling for the Retell custom LLM protocol.

pub mod handler;
pub mod messages;

pub use handler::session_handler;
pub use messages::{InboundFrame, OutboundFrame, SessionCapabilities, TurnRequest};
