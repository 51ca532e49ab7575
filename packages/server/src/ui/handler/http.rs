//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};

use crate::{
    domain::{RoomId, Timestamp, Version},
    infrastructure::dto::http::{
        ChatHistoryDto, ChatHistoryQuery, HealthDto, RoomDetailDto, RoomSummaryDto,
        WhiteboardHistoryDto, WhiteboardHistoryQuery,
    },
    ui::state::AppState,
    usecase::GetRoomDetailError,
};
use huddle_shared::time::{get_utc_timestamp, timestamp_to_rfc3339};

use super::auth::{authenticate, bearer_token};

fn parse_room_id(room_id: String) -> Result<RoomId, StatusCode> {
    RoomId::new(room_id).map_err(|e| {
        tracing::debug!("Invalid room id in path: {}", e);
        StatusCode::BAD_REQUEST
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
        timestamp: timestamp_to_rfc3339(get_utc_timestamp()),
    })
}

/// Get list of active rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.into_iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = parse_room_id(room_id)?;
    match state.get_room_detail_usecase.execute(&room_id).await {
        Ok(room) => Ok(Json(room.into())),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}

/// Get recent chat messages of a room (requires a bearer token)
pub async fn get_chat_history(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<ChatHistoryQuery>,
    headers: HeaderMap,
) -> Result<Json<ChatHistoryDto>, StatusCode> {
    authenticate(&state, bearer_token(&headers)).await?;
    let room_id = parse_room_id(room_id)?;

    let messages = state
        .get_chat_history_usecase
        .execute(&room_id, query.limit, query.before.map(Timestamp::new))
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(ChatHistoryDto {
        messages: messages.into_iter().map(Into::into).collect(),
    }))
}

/// Get whiteboard actions newer than `fromVersion` (requires a bearer token)
pub async fn get_whiteboard_history(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<WhiteboardHistoryQuery>,
    headers: HeaderMap,
) -> Result<Json<WhiteboardHistoryDto>, StatusCode> {
    authenticate(&state, bearer_token(&headers)).await?;
    let room_id = parse_room_id(room_id)?;

    let actions = state
        .get_whiteboard_history_usecase
        .fetch(&room_id, Version::from_lower_bound(query.from_version))
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(WhiteboardHistoryDto {
        actions: actions.into_iter().map(Into::into).collect(),
    }))
}
