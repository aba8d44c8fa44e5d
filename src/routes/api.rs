//! HTTP route configuration: health check and webhook.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, webhook};
use crate::state::AppState;
use std::sync::Arc;

/// Create the HTTP API router.
///
/// # Endpoints
///
/// - `GET /` - health check
/// - `POST /webhook` - call lifecycle notifications (signature-verified
///   when a Retell API key is configured)
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::health_check))
        .route("/webhook", post(webhook::webhook_handler))
        .layer(TraceLayer::new_for_http())
}
