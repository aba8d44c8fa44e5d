//! Per-call WebSocket session controller.
//!
//! One receive/dispatch loop per connection: each inbound frame is fully
//! handled, including any completion-call streaming, before the next frame
//! is read. At most one response generation is in flight per call, so
//! partial frames for one `response_id` never interleave with another.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::core::llm::{StreamChunk, TurnKind, assemble_prompt};
use crate::state::AppState;

use super::messages::{InboundFrame, OutboundFrame, TurnRequest};

/// Outbound channel depth; generation output is small and drained fast.
const CHANNEL_BUFFER_SIZE: usize = 64;

/// Scripted opening line; the agent speaks first and this is not a model
/// call.
const OPENING_LINE: &str = "Hey there, am I speaking with Marcus?";

/// Session WebSocket handler.
///
/// Upgrades the HTTP connection to a WebSocket bound to one call.
pub async fn session_handler(
    ws: WebSocketUpgrade,
    Path(call_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    info!(%call_id, "WebSocket connection upgrade requested");
    ws.on_upgrade(move |socket| handle_session(socket, state, call_id))
}

/// Run one session over an established WebSocket connection.
async fn handle_session(socket: WebSocket, state: Arc<AppState>, call_id: String) {
    info!(%call_id, "WebSocket connected");

    let (mut sender, mut receiver) = socket.split();
    let (frame_tx, mut frame_rx) = mpsc::channel::<OutboundFrame>(CHANNEL_BUFFER_SIZE);

    // Sender task for outgoing frames
    let sender_task = tokio::spawn(async move {
        while let Some(frame) = frame_rx.recv().await {
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize outbound frame: {}", e);
                    continue;
                }
            };

            if let Err(e) = sender.send(Message::Text(json.into())).await {
                error!("Failed to send WebSocket message: {}", e);
                break;
            }
        }
    });

    // Declare session capabilities before any interaction event arrives.
    if frame_tx.send(OutboundFrame::session_config()).await.is_err() {
        warn!(%call_id, "Connection closed before config frame was sent");
        return;
    }

    while let Some(msg_result) = receiver.next().await {
        match msg_result {
            Ok(msg) => {
                let continue_session = process_message(msg, &state, &call_id, &frame_tx).await;
                if !continue_session {
                    break;
                }
            }
            Err(e) => {
                info!(%call_id, error = %e, "WebSocket transport error");
                break;
            }
        }
    }

    // Closing the channel lets the sender task drain pending frames and exit.
    drop(frame_tx);
    let _ = sender_task.await;

    info!(%call_id, "WebSocket session closed");
}

/// Handle one inbound WebSocket message. Returns false when the session
/// should end.
async fn process_message(
    msg: Message,
    state: &Arc<AppState>,
    call_id: &str,
    frame_tx: &mpsc::Sender<OutboundFrame>,
) -> bool {
    match msg {
        Message::Text(text) => {
            let frame: InboundFrame = match serde_json::from_str(&text) {
                Ok(frame) => frame,
                Err(e) => {
                    // Fail-closed: a malformed payload terminates the
                    // session instead of being skipped.
                    error!(%call_id, error = %e, "Malformed inbound frame, terminating session");
                    return false;
                }
            };

            dispatch_frame(frame, state, call_id, frame_tx).await;
            true
        }
        Message::Binary(data) => {
            debug!(%call_id, len = data.len(), "Ignoring unexpected binary frame");
            true
        }
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            info!(%call_id, "WebSocket close received");
            false
        }
    }
}

/// Dispatch an inbound frame by interaction type.
async fn dispatch_frame(
    frame: InboundFrame,
    state: &Arc<AppState>,
    call_id: &str,
    frame_tx: &mpsc::Sender<OutboundFrame>,
) {
    match frame {
        InboundFrame::CallDetails { .. } => {
            info!(%call_id, "Call details received");
            let _ = frame_tx.send(OutboundFrame::opening(OPENING_LINE)).await;
        }
        InboundFrame::PingPong { timestamp } => {
            let _ = frame_tx.send(OutboundFrame::PingPong { timestamp }).await;
        }
        InboundFrame::UpdateOnly { .. } => {
            // Transcript update only; each turn request carries its own
            // transcript, so nothing is retained here.
            debug!(%call_id, "Transcript update, no response needed");
        }
        InboundFrame::ResponseRequired(request) => {
            run_turn(state, call_id, request, TurnKind::Response, frame_tx).await;
        }
        InboundFrame::ReminderRequired(request) => {
            run_turn(state, call_id, request, TurnKind::Reminder, frame_tx).await;
        }
        InboundFrame::Unknown => {
            warn!(%call_id, "Unknown interaction type");
        }
    }
}

/// Run one response-generating turn to completion.
///
/// Relays each content delta as a partial frame and closes the turn with a
/// terminal frame when the stream is exhausted. When the upstream call
/// fails the relay emits nothing further for this turn (the failure is
/// logged inside the client) and the turn stays open on the peer's side.
async fn run_turn(
    state: &Arc<AppState>,
    call_id: &str,
    request: TurnRequest,
    kind: TurnKind,
    frame_tx: &mpsc::Sender<OutboundFrame>,
) {
    let messages = assemble_prompt(&request.transcript, kind);
    debug!(
        %call_id,
        response_id = request.response_id,
        message_count = messages.len(),
        "Starting completion turn"
    );

    let mut chunks = state.llm.chat_stream(messages);
    while let Some(chunk) = chunks.recv().await {
        let frame = match chunk {
            StreamChunk::TextDelta(content) => OutboundFrame::partial(request.response_id, content),
            StreamChunk::Done => OutboundFrame::turn_complete(request.response_id),
        };

        if frame_tx.send(frame).await.is_err() {
            debug!(%call_id, "Session closed mid-turn, dropping remaining output");
            break;
        }
    }
}
