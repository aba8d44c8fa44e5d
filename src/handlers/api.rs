//! Health check endpoint.

use axum::Json;
use serde::Serialize;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /` - liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Retell Groq Custom LLM Server",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(body) = health_check().await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.message, "Retell Groq Custom LLM Server");
    }

    #[test]
    fn health_response_shape() {
        let body = HealthResponse {
            status: "ok",
            message: "Retell Groq Custom LLM Server",
        };
        let json = serde_json::to_string(&body).expect("Should serialize");
        assert_eq!(
            json,
            r#"{"status":"ok","message":"Retell Groq Custom LLM Server"}"#
        );
    }
}
