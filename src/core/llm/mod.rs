//! Groq chat-completion integration.
//!
//! This module owns everything between an inbound Retell request and the
//! outbound stream of response frames:
//! - `prompt` - transcript adaptation and prompt assembly
//! - `messages` - OpenAI-compatible request/response wire types
//! - `client` - the streaming relay against Groq's completion API

pub mod client;
pub mod messages;
pub mod prompt;

pub use client::{
    DEFAULT_MODEL, GROQ_API_BASE, LlmClient, LlmConfig, LlmError, LlmResult, StreamChunk,
};
pub use messages::{ChatCompletionChunk, ChatCompletionRequest, ChatMessage, ChatRole};
pub use prompt::{TurnKind, Utterance, assemble_prompt, transcript_to_chat_messages};
