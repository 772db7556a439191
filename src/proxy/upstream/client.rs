// LCU upstream client
// The only place in the crate allowed to talk to the local game client.

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use reqwest::{header, Client};
use serde_json::Value;
use tokio::time::Duration;

use crate::error::{AppError, AppResult};
use crate::models::Session;

/// Fixed Basic auth username of the LCU API.
const BASIC_AUTH_USER: &str = "riot";

/// Classified upstream response body, ready for relay to the browser.
#[derive(Debug)]
pub enum UpstreamBody {
    Json(Value),
    Text(String),
    Binary(Bytes),
}

impl IntoResponse for UpstreamBody {
    fn into_response(self) -> Response {
        match self {
            UpstreamBody::Json(value) => Json(value).into_response(),
            UpstreamBody::Text(text) => {
                ([(CONTENT_TYPE, "text/plain")], text).into_response()
            }
            UpstreamBody::Binary(bytes) => {
                ([(CONTENT_TYPE, "image/png")], bytes).into_response()
            }
        }
    }
}

pub struct LcuClient {
    http_client: Client,
}

impl LcuClient {
    /// Build the dedicated LCU client.
    ///
    /// Certificate validation is disabled: the LCU serves a self-signed
    /// certificate on loopback that never chains to a root. This client
    /// must not be reused for any non-loopback traffic.
    pub fn new(timeout_secs: u64) -> Self {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create LCU HTTP client");

        Self { http_client }
    }

    /// Build the request URL for a target path.
    ///
    /// Always HTTPS regardless of the lockfile's protocol field; the LCU
    /// port always serves TLS.
    fn build_url(port: u16, target_path: &str) -> String {
        format!("https://127.0.0.1:{}{}", port, target_path)
    }

    fn accept_header(is_binary: bool) -> &'static str {
        if is_binary {
            "*/*"
        } else {
            "application/json"
        }
    }

    /// Forward a request to the LCU API and classify the response.
    ///
    /// Non-2xx upstream statuses become `UpstreamHttp` carrying the status
    /// and body text; connection-level failures become `UpstreamTransport`.
    /// No retries: a single failure is surfaced immediately.
    pub async fn forward(
        &self,
        target_path: &str,
        session: &Session,
        is_binary: bool,
    ) -> AppResult<UpstreamBody> {
        let url = Self::build_url(session.port, target_path);
        tracing::debug!("Forwarding to LCU: {} (binary: {})", url, is_binary);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(BASIC_AUTH_USER, Some(&session.password))
            .header(header::ACCEPT, Self::accept_header(is_binary))
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| AppError::UpstreamTransport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "HTTP Error".to_string());
            return Err(AppError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        if is_binary {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| AppError::UpstreamTransport(e.to_string()))?;
            return Ok(UpstreamBody::Binary(bytes));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::UpstreamTransport(e.to_string()))?;
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(UpstreamBody::Json(value)),
            Err(_) => Ok(UpstreamBody::Text(text)),
        }
    }
}
