// Middleware module - Axum middleware

pub mod cors;

pub use cors::{cors_layer, cors_response_headers, preflight};
