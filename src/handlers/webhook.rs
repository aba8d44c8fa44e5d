//! Call lifecycle webhook endpoint.
//!
//! Retell delivers out-of-band call events (`call_started`, `call_ended`,
//! `call_analyzed`) here. Events are consumed for logging only; unknown
//! event names are logged, not rejected.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::errors::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::verify_signature;

/// Header carrying the HMAC signature of the request body.
const SIGNATURE_HEADER: &str = "x-retell-signature";

/// Webhook payload. Tolerant shape; everything beyond the event name and
/// call id is ignored.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub data: Option<WebhookData>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    #[serde(default)]
    pub call_id: Option<String>,
}

/// `POST /webhook` - call lifecycle notifications.
///
/// When a Retell API key is configured and the request carries a signature
/// header, the signature is verified over the raw body before the payload
/// is parsed. Requests without a signature header are accepted as-is,
/// matching Retell's behavior for unsigned test deliveries.
pub async fn webhook_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> AppResult<Json<Value>> {
    if let (Some(secret), Some(header)) = (
        state.config.retell_api_key.as_deref(),
        headers.get(SIGNATURE_HEADER),
    ) {
        let signature = header.to_str().map_err(|_| {
            error!("Webhook signature header is not valid UTF-8");
            AppError::InvalidSignature
        })?;

        if !verify_signature(body.as_bytes(), secret, signature) {
            error!("Invalid webhook signature");
            return Err(AppError::InvalidSignature);
        }
    }

    let event: WebhookEvent =
        serde_json::from_str(&body).map_err(|e| AppError::InvalidPayload(e.to_string()))?;

    let call_id = event
        .data
        .as_ref()
        .and_then(|data| data.call_id.as_deref())
        .unwrap_or("unknown");

    match event.event.as_deref() {
        Some("call_started") => info!(call_id, "Call started"),
        Some("call_ended") => info!(call_id, "Call ended"),
        Some("call_analyzed") => info!(call_id, "Call analyzed"),
        other => info!(event = ?other, call_id, "Unknown webhook event"),
    }

    Ok(Json(json!({ "received": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_payload_deserializes() {
        let json = r#"{"event":"call_started","data":{"call_id":"call_abc","agent_id":"ag_1"}}"#;
        let event: WebhookEvent = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(event.event.as_deref(), Some("call_started"));
        assert_eq!(
            event.data.and_then(|d| d.call_id).as_deref(),
            Some("call_abc")
        );
    }

    #[test]
    fn missing_fields_default_to_none() {
        let event: WebhookEvent = serde_json::from_str("{}").expect("Should deserialize");
        assert!(event.event.is_none());
        assert!(event.data.is_none());
    }
}
