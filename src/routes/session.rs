//! Session WebSocket route configuration.
//!
//! One WebSocket connection per call; the call id travels as a path
//! parameter.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::session_handler;
use crate::state::AppState;
use std::sync::Arc;

/// Create the session WebSocket router.
///
/// # Endpoint
///
/// `GET /llm-websocket/{call_id}` - WebSocket upgrade for one call session
///
/// # Protocol
///
/// After the upgrade the server sends one `config` frame, then answers
/// inbound interaction events: `ping_pong` is echoed, `call_details`
/// triggers the scripted opening line, and `response_required` /
/// `reminder_required` stream generated `response` frames terminated by a
/// `content_complete` frame.
pub fn create_session_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/llm-websocket/{call_id}", get(session_handler))
        .layer(TraceLayer::new_for_http())
}
