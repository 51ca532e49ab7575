//! UseCase: ホワイトボード履歴の取得
//!
//! 途中から参加した（または再接続した）クライアントが、`from_version` より
//! 新しい操作を昇順で受け取って再生する。

use std::sync::Arc;

use crate::{
    domain::{Connection, MessagePusher, RoomId, RoomRegistry, Version, WhiteboardAction, WhiteboardSequencer},
    infrastructure::dto::websocket::{ServerEvent, WhiteboardHistoryMessage},
};

use super::{SignalingError, membership::require_participant, notify::push_event};

pub struct GetWhiteboardHistoryUseCase {
    registry: Arc<dyn RoomRegistry>,
    sequencer: Arc<WhiteboardSequencer>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetWhiteboardHistoryUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        sequencer: Arc<WhiteboardSequencer>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            sequencer,
            message_pusher,
        }
    }

    /// 参加者本人に whiteboard-history を送る
    pub async fn execute(
        &self,
        connection: &Connection,
        room_id: &RoomId,
        from_version: Version,
    ) -> Result<Vec<WhiteboardAction>, SignalingError> {
        require_participant(self.registry.as_ref(), room_id, connection).await?;
        let actions = self.fetch(room_id, from_version).await?;

        let event = ServerEvent::WhiteboardHistory(WhiteboardHistoryMessage {
            actions: actions.iter().cloned().map(Into::into).collect(),
        });
        if let Err(e) = push_event(self.message_pusher.as_ref(), &connection.id, &event).await {
            tracing::warn!("Failed to send whiteboard history to {}: {}", connection.id, e);
        }

        Ok(actions)
    }

    /// 履歴だけを取得（HTTP API 用）
    pub async fn fetch(
        &self,
        room_id: &RoomId,
        from_version: Version,
    ) -> Result<Vec<WhiteboardAction>, SignalingError> {
        self.sequencer
            .history(room_id, from_version)
            .await
            .map_err(|e| {
                tracing::warn!(
                    "Failed to load whiteboard history of room '{}': {}",
                    room_id,
                    e
                );
                SignalingError::Persistence("failed to load whiteboard history".to_string())
            })
    }
}
