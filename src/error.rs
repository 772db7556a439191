use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Lockfile not found. Make sure League client is running or use manual input.")]
    CredentialsNotFound,

    #[error("Invalid JSON data")]
    InvalidManualInput,

    #[error("Unknown API endpoint")]
    UnknownEndpoint,

    #[error("LCU API error: {status} - {body}")]
    UpstreamHttp { status: u16, body: String },

    #[error("Request failed: {0}")]
    UpstreamTransport(String),

    #[error("Server error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::UpstreamTransport(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

// Every handled application error surfaces to the browser as HTTP 400
// with an `{"error": ...}` body, matching the front-end's contract.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
