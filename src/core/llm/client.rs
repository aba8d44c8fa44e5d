//! Streaming relay against Groq's OpenAI-compatible completion API.
//!
//! One completion call per conversational turn: the client issues a
//! streamed `chat/completions` request and forwards each content delta as
//! it arrives. Upstream failures (HTTP errors, transport errors mid-stream,
//! malformed chunks) are logged with full detail and swallowed without a
//! terminal chunk, so the session peer never sees raw error text. A failed
//! turn therefore produces no completion frame at all; this is deliberate
//! and is a known limitation of the protocol.
//!
//! No timeout is enforced on the completion call.

use futures_util::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error};

use super::messages::{ChatCompletionChunk, ChatCompletionRequest, ChatMessage};

// =============================================================================
// Constants
// =============================================================================

/// Groq OpenAI-compatible API base URL.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Sampling temperature for all turns.
const TEMPERATURE: f32 = 0.2;

/// Output length bound per turn. Kept small; responses are spoken aloud.
const MAX_TOKENS: u32 = 100;

/// Nucleus sampling bound for all turns.
const TOP_P: f32 = 0.9;

/// SSE payload that terminates an OpenAI-compatible stream.
const SSE_DONE: &str = "[DONE]";

/// SSE data line prefix.
const SSE_DATA_PREFIX: &str = "data: ";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during a completion call.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Request could not be sent or the stream broke mid-flight
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider returned a non-success status
    #[error("Provider returned {status}: {body}")]
    Provider {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A streamed chunk could not be parsed
    #[error("Malformed stream chunk: {message} (payload: {payload})")]
    MalformedChunk { message: String, payload: String },
}

/// Result type for completion operations.
pub type LlmResult<T> = Result<T, LlmError>;

// =============================================================================
// Stream Output
// =============================================================================

/// Incremental output of one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChunk {
    /// One content delta, in arrival order
    TextDelta(String),
    /// Stream exhausted; emitted exactly once on the success path
    Done,
}

// =============================================================================
// Client
// =============================================================================

/// Configuration for the completion client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GROQ_API_BASE.to_string(),
        }
    }
}

/// Groq completion client.
///
/// Holds only network and auth configuration; constructed once at startup
/// and shared read-only across connections.
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Start one streamed completion call for an assembled message list.
    ///
    /// Returns a receiver yielding [`StreamChunk::TextDelta`] per content
    /// delta followed by exactly one [`StreamChunk::Done`]. If the upstream
    /// call fails the error is logged and the channel closes without a
    /// `Done`; the caller must not treat channel closure as completion.
    pub fn chat_stream(&self, messages: Vec<ChatMessage>) -> mpsc::UnboundedReceiver<StreamChunk> {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = self.clone();

        tokio::spawn(async move {
            if let Err(e) = client.stream_completion(messages, &tx).await {
                // Swallowed on purpose: no error or terminal chunk reaches
                // the peer, the failure is only observable in the logs.
                error!(error = %e, "Completion stream failed, turn dropped");
            }
        });

        rx
    }

    /// Issue the completion request and forward deltas until exhaustion.
    async fn stream_completion(
        &self,
        messages: Vec<ChatMessage>,
        tx: &mpsc::UnboundedSender<StreamChunk>,
    ) -> LlmResult<()> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            stream: true,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider { status, body });
        }

        let mut byte_stream = response.bytes_stream();
        let mut line_buffer = String::new();

        while let Some(result) = byte_stream.next().await {
            let bytes = result?;
            line_buffer.push_str(&String::from_utf8_lossy(&bytes));

            // Process complete lines
            while let Some(newline_pos) = line_buffer.find('\n') {
                let line = line_buffer[..newline_pos]
                    .trim_end_matches('\r')
                    .to_string();
                line_buffer = line_buffer[newline_pos + 1..].to_string();

                let Some(data) = line.strip_prefix(SSE_DATA_PREFIX) else {
                    continue;
                };

                if data == SSE_DONE {
                    let _ = tx.send(StreamChunk::Done);
                    return Ok(());
                }

                let chunk: ChatCompletionChunk =
                    serde_json::from_str(data).map_err(|e| LlmError::MalformedChunk {
                        message: e.to_string(),
                        payload: data.to_string(),
                    })?;

                if let Some(content) = chunk.content_delta() {
                    let _ = tx.send(StreamChunk::TextDelta(content.to_string()));
                }
            }
        }

        // Stream exhausted without a [DONE] sentinel; still a completed turn.
        debug!("Completion stream ended without [DONE] sentinel");
        let _ = tx.send(StreamChunk::Done);
        Ok(())
    }
}
