//! UseCase: チャットメッセージの送信
//!
//! 外部ストアへの保存が成功してから、送信者を含むルームの全員に配信する。
//! 保存に失敗したメッセージは誰にも配信しない。

use std::sync::Arc;

use huddle_shared::time::Clock;

use crate::{
    domain::{
        ChatMessage, ChatMessageType, ChatStore, Connection, MessageBody, MessagePusher,
        NewChatMessage, RoomId, RoomRegistry, Timestamp,
    },
    infrastructure::dto::websocket::ServerEvent,
};

use super::{
    SignalingError,
    membership::require_participant,
    notify::{broadcast_event, everyone},
};

pub struct SendChatMessageUseCase {
    registry: Arc<dyn RoomRegistry>,
    chat_store: Arc<dyn ChatStore>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendChatMessageUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        chat_store: Arc<dyn ChatStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            chat_store,
            message_pusher,
            clock,
        }
    }

    /// # Errors
    ///
    /// - 参加していないルームへの送信は `SignalingError::Validation`
    /// - 保存に失敗した場合は `SignalingError::Persistence`
    pub async fn execute(
        &self,
        connection: &Connection,
        room_id: RoomId,
        message: MessageBody,
        message_type: ChatMessageType,
        reply_to: Option<String>,
    ) -> Result<ChatMessage, SignalingError> {
        let participant = require_participant(self.registry.as_ref(), &room_id, connection).await?;

        let new_message = NewChatMessage {
            room_id,
            user_id: participant.user_id,
            username: participant.username,
            message,
            message_type,
            reply_to,
            timestamp: Timestamp::new(self.clock.now_millis()),
        };
        let stored = self.chat_store.append(new_message).await.map_err(|e| {
            tracing::warn!("Failed to store chat message from {}: {}", connection.id, e);
            SignalingError::Persistence("failed to send message".to_string())
        })?;

        let participants = self.registry.snapshot(&stored.room_id).await;
        let event = ServerEvent::ChatMessage(stored.clone().into());
        broadcast_event(self.message_pusher.as_ref(), everyone(&participants), &event).await;

        Ok(stored)
    }
}
