//! Wire types for the Retell custom LLM WebSocket protocol.
//!
//! Inbound frames are tagged by `interaction_type`, outbound frames by
//! `response_type`. Both travel as JSON text frames on the per-call
//! WebSocket connection.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::core::llm::Utterance;

// =============================================================================
// Incoming Frames (Platform -> Server)
// =============================================================================

/// Inbound WebSocket frames from the Retell platform.
#[derive(Debug, Deserialize)]
#[serde(tag = "interaction_type")]
pub enum InboundFrame {
    /// Full call metadata, sent once after connect. The agent speaks
    /// first, so this triggers the scripted opening line.
    #[serde(rename = "call_details")]
    CallDetails {
        #[serde(default)]
        call: Option<serde_json::Value>,
    },

    /// Heartbeat; echoed back with the same timestamp.
    #[serde(rename = "ping_pong")]
    PingPong {
        #[serde(default)]
        timestamp: Option<Number>,
    },

    /// Transcript-only update; no response expected.
    #[serde(rename = "update_only")]
    UpdateOnly {
        #[serde(default)]
        transcript: Vec<Utterance>,
    },

    /// The caller finished speaking; a generated response is required.
    #[serde(rename = "response_required")]
    ResponseRequired(TurnRequest),

    /// The caller has been silent; a re-engagement response is required.
    #[serde(rename = "reminder_required")]
    ReminderRequired(TurnRequest),

    /// Unrecognized interaction type (forward compatibility).
    #[serde(other)]
    Unknown,
}

/// Payload of a response-generating turn.
#[derive(Debug, Clone, Deserialize)]
pub struct TurnRequest {
    /// Correlation id; every frame answering this turn carries it.
    pub response_id: u64,
    /// Running transcript; each request carries its own copy.
    #[serde(default)]
    pub transcript: Vec<Utterance>,
}

// =============================================================================
// Outgoing Frames (Server -> Platform)
// =============================================================================

/// Outbound WebSocket frames to the Retell platform.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "response_type")]
pub enum OutboundFrame {
    /// Session capabilities, sent once on connect.
    #[serde(rename = "config")]
    Config { config: SessionCapabilities },

    /// One piece of a turn's generated content. A turn is zero or more
    /// partial frames closed by exactly one frame with empty content and
    /// `content_complete: true`.
    #[serde(rename = "response")]
    Response {
        response_id: u64,
        content: String,
        content_complete: bool,
        end_call: bool,
    },

    /// Heartbeat echo.
    #[serde(rename = "ping_pong")]
    PingPong { timestamp: Option<Number> },
}

/// Capabilities declared to the platform on connect.
#[derive(Debug, Clone, Serialize)]
pub struct SessionCapabilities {
    pub auto_reconnect: bool,
    pub call_details: bool,
}

impl OutboundFrame {
    /// Config frame announcing session capabilities.
    pub fn session_config() -> Self {
        Self::Config {
            config: SessionCapabilities {
                auto_reconnect: true,
                call_details: true,
            },
        }
    }

    /// Complete scripted response for the opening turn (`response_id` 0).
    pub fn opening(content: impl Into<String>) -> Self {
        Self::Response {
            response_id: 0,
            content: content.into(),
            content_complete: true,
            end_call: false,
        }
    }

    /// Partial content frame for an in-flight turn.
    pub fn partial(response_id: u64, content: String) -> Self {
        Self::Response {
            response_id,
            content,
            content_complete: false,
            end_call: false,
        }
    }

    /// Terminal frame closing a turn.
    pub fn turn_complete(response_id: u64) -> Self {
        Self::Response {
            response_id,
            content: String::new(),
            content_complete: true,
            end_call: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_details_deserializes() {
        let json = r#"{"interaction_type":"call_details","call":{"call_id":"c1"}}"#;
        let frame: InboundFrame = serde_json::from_str(json).expect("Should deserialize");
        assert!(matches!(frame, InboundFrame::CallDetails { .. }));
    }

    #[test]
    fn ping_pong_keeps_exact_timestamp() {
        let json = r#"{"interaction_type":"ping_pong","timestamp":12345}"#;
        let frame: InboundFrame = serde_json::from_str(json).expect("Should deserialize");
        match frame {
            InboundFrame::PingPong { timestamp } => {
                let echoed = serde_json::to_string(&OutboundFrame::PingPong { timestamp })
                    .expect("Should serialize");
                assert_eq!(echoed, r#"{"response_type":"ping_pong","timestamp":12345}"#);
            }
            _ => panic!("Expected PingPong variant"),
        }
    }

    #[test]
    fn response_required_deserializes_with_transcript() {
        let json = r#"{
            "interaction_type": "response_required",
            "response_id": 3,
            "transcript": [
                {"role": "agent", "content": "Hi"},
                {"role": "user", "content": "Hello"}
            ]
        }"#;
        let frame: InboundFrame = serde_json::from_str(json).expect("Should deserialize");
        match frame {
            InboundFrame::ResponseRequired(request) => {
                assert_eq!(request.response_id, 3);
                assert_eq!(request.transcript.len(), 2);
                assert_eq!(request.transcript[0].role, "agent");
            }
            _ => panic!("Expected ResponseRequired variant"),
        }
    }

    #[test]
    fn reminder_required_without_transcript_defaults_empty() {
        let json = r#"{"interaction_type":"reminder_required","response_id":7}"#;
        let frame: InboundFrame = serde_json::from_str(json).expect("Should deserialize");
        match frame {
            InboundFrame::ReminderRequired(request) => {
                assert_eq!(request.response_id, 7);
                assert!(request.transcript.is_empty());
            }
            _ => panic!("Expected ReminderRequired variant"),
        }
    }

    #[test]
    fn unrecognized_interaction_type_is_unknown() {
        let json = r#"{"interaction_type":"agent_interrupted","something":1}"#;
        let frame: InboundFrame = serde_json::from_str(json).expect("Should deserialize");
        assert!(matches!(frame, InboundFrame::Unknown));
    }

    #[test]
    fn config_frame_shape() {
        let json = serde_json::to_string(&OutboundFrame::session_config()).unwrap();
        assert_eq!(
            json,
            r#"{"response_type":"config","config":{"auto_reconnect":true,"call_details":true}}"#
        );
    }

    #[test]
    fn opening_frame_shape() {
        let json =
            serde_json::to_string(&OutboundFrame::opening("Hey there, am I speaking with Marcus?"))
                .unwrap();
        assert_eq!(
            json,
            r#"{"response_type":"response","response_id":0,"content":"Hey there, am I speaking with Marcus?","content_complete":true,"end_call":false}"#
        );
    }

    #[test]
    fn partial_frame_is_not_complete() {
        let json = serde_json::to_string(&OutboundFrame::partial(4, "Hi".to_string())).unwrap();
        assert!(json.contains(r#""response_id":4"#));
        assert!(json.contains(r#""content_complete":false"#));
        assert!(json.contains(r#""end_call":false"#));
    }

    #[test]
    fn terminal_frame_has_empty_content() {
        let json = serde_json::to_string(&OutboundFrame::turn_complete(4)).unwrap();
        assert_eq!(
            json,
            r#"{"response_type":"response","response_id":4,"content":"","content_complete":true,"end_call":false}"#
        );
    }
}
