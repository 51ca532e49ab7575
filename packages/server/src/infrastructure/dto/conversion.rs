//! Conversion logic between DTOs and domain entities.

use crate::domain::{ActiveRoom, entity};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::Participant> for dto::ParticipantInfo {
    fn from(model: entity::Participant) -> Self {
        Self {
            connection_id: model.connection_id.to_string(),
            user_id: model.user_id.into_string(),
            username: model.username.into_string(),
            is_audio_enabled: model.is_audio_enabled,
            is_video_enabled: model.is_video_enabled,
        }
    }
}

impl From<entity::WhiteboardAction> for dto::WhiteboardActionInfo {
    fn from(model: entity::WhiteboardAction) -> Self {
        Self {
            room_id: model.room_id.into_string(),
            action: model.kind,
            data: model.payload,
            user_id: model.user_id.into_string(),
            username: model.username.into_string(),
            version: model.version.value(),
            timestamp: model.timestamp.value(),
        }
    }
}

impl From<entity::ChatMessage> for dto::ChatMessageInfo {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            id: model.id,
            room_id: model.room_id.into_string(),
            user_id: model.user_id.into_string(),
            username: model.username.into_string(),
            message: model.message.into_string(),
            message_type: model.message_type,
            timestamp: model.timestamp.value(),
            reply_to: model.reply_to,
        }
    }
}

impl From<entity::Connection> for dto::ConnectedMessage {
    fn from(model: entity::Connection) -> Self {
        Self {
            connection_id: model.id.to_string(),
            user_id: model.identity.user_id.into_string(),
            username: model.identity.username.into_string(),
        }
    }
}

impl From<ActiveRoom> for http::RoomSummaryDto {
    fn from(model: ActiveRoom) -> Self {
        Self {
            id: model.id.into_string(),
            participant_count: model.participants.len(),
            participants: model
                .participants
                .iter()
                .map(|p| p.connection_id.to_string())
                .collect(),
        }
    }
}

impl From<ActiveRoom> for http::RoomDetailDto {
    fn from(model: ActiveRoom) -> Self {
        Self {
            id: model.id.into_string(),
            participants: model.participants.into_iter().map(Into::into).collect(),
        }
    }
}
