//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::{ChatMessageInfo, ParticipantInfo, WhiteboardActionInfo};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// RFC 3339 (UTC)
    pub timestamp: String,
}

/// Active room summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub participant_count: usize,
    /// Connection ids of the participants
    pub participants: Vec<String>,
}

/// Active room detail
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub participants: Vec<ParticipantInfo>,
}

/// Query for `GET /api/rooms/{room_id}/messages`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatHistoryQuery {
    pub limit: Option<usize>,
    /// Unix timestamp in UTC (milliseconds), exclusive
    pub before: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryDto {
    pub messages: Vec<ChatMessageInfo>,
}

/// Query for `GET /api/rooms/{room_id}/whiteboard`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardHistoryQuery {
    /// 負の値は 0 として扱う
    #[serde(default)]
    pub from_version: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhiteboardHistoryDto {
    pub actions: Vec<WhiteboardActionInfo>,
}
