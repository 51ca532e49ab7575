//! Token extraction for HTTP and WebSocket requests.

use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};

use crate::{domain::Identity, ui::state::AppState};

/// `Authorization: Bearer <token>` header value
pub(super) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Verify the token, mapping every failure to 401
pub(super) async fn authenticate(state: &AppState, token: Option<String>) -> Result<Identity, StatusCode> {
    let Some(token) = token else {
        tracing::debug!("Rejected request without a token");
        return Err(StatusCode::UNAUTHORIZED);
    };
    state
        .connect_participant_usecase
        .authenticate(&token)
        .await
        .map_err(|e| {
            tracing::warn!("Rejected request: {}", e);
            StatusCode::UNAUTHORIZED
        })
}
