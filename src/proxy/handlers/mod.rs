// API endpoint handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::Session;
use crate::proxy::server::AppState;

/// LCU target for the Arena challenge endpoint.
const ARENA_CHALLENGE_TARGET: &str = "/lol-challenges/v1/challenges/local-player";
/// LCU target for the owned-champions endpoint.
const CHAMPIONS_TARGET: &str = "/lol-champions/v1/owned-champions-minimal";

/// `/api/champion-image/<rest>` forwards to `/<rest>` on the LCU.
fn champion_image_target(rest: &str) -> String {
    format!("/{}", rest)
}

/// `POST /api/lockfile` — accept manually supplied credentials.
///
/// The body is parsed from raw bytes so a malformed payload maps to the
/// structured `InvalidManualInput` error instead of an extractor rejection,
/// and never touches existing state.
pub async fn post_lockfile(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let session: Session =
        serde_json::from_slice(&body).map_err(|_| AppError::InvalidManualInput)?;
    state.sessions.set_manual(session).await;
    Ok(Json(json!({
        "success": true,
        "message": "Lockfile data saved"
    })))
}

/// `GET /api/lockfile` — the resolved session as JSON.
pub async fn get_lockfile(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.sessions.resolve().await?;
    Ok(Json(session))
}

/// `GET /api/arena-challenge`
pub async fn arena_challenge(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.sessions.resolve().await?;
    state
        .upstream
        .forward(ARENA_CHALLENGE_TARGET, &session, false)
        .await
}

/// `GET /api/champions`
pub async fn champions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.sessions.resolve().await?;
    state
        .upstream
        .forward(CHAMPIONS_TARGET, &session, false)
        .await
}

/// `GET /api/champion-image/*path` — binary relay of client assets.
pub async fn champion_image(
    State(state): State<AppState>,
    Path(rest): Path<String>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.resolve().await?;
    let target = champion_image_target(&rest);
    info!("Requesting champion image: {}", target);
    state.upstream.forward(&target, &session, true).await
}

/// Catch-all for unrecognized `/api/*` paths.
pub async fn unknown_endpoint() -> AppError {
    AppError::UnknownEndpoint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_path_maps_to_rest_of_uri() {
        assert_eq!(
            champion_image_target("lol-game-data/assets/x.png"),
            "/lol-game-data/assets/x.png"
        );
    }

    #[test]
    fn fixed_targets_match_the_lcu_endpoints() {
        assert_eq!(
            ARENA_CHALLENGE_TARGET,
            "/lol-challenges/v1/challenges/local-player"
        );
        assert_eq!(CHAMPIONS_TARGET, "/lol-champions/v1/owned-champions-minimal");
    }
}
