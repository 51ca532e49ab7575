//! UseCase: マイク・カメラの切り替え
//!
//! 参加者のフラグを更新し、同じルームの他の参加者に通知する。既に退出した
//! 参加者からの切り替えは退出との競合として黙って無視する。

use std::sync::Arc;

use crate::{
    domain::{Connection, MediaKind, MessagePusher, Participant, RoomId, RoomRegistry},
    infrastructure::dto::websocket::{MediaChangedMessage, ServerEvent},
};

use super::notify::{broadcast_event, others};

pub struct ToggleMediaUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ToggleMediaUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 更新後の参加者を返す（参加していなければ `None`）
    pub async fn execute(
        &self,
        connection: &Connection,
        room_id: &RoomId,
        kind: MediaKind,
        enabled: bool,
    ) -> Option<Participant> {
        let participant = match self
            .registry
            .set_media(room_id, &connection.id, kind, enabled)
            .await
        {
            Ok(participant) => participant,
            Err(e) => {
                tracing::debug!("Ignoring media toggle from {}: {}", connection.id, e);
                return None;
            }
        };

        let participants = self.registry.snapshot(room_id).await;
        let event = ServerEvent::ParticipantMediaChanged(MediaChangedMessage {
            connection_id: connection.id.to_string(),
            kind,
            enabled,
        });
        broadcast_event(
            self.message_pusher.as_ref(),
            others(&participants, &connection.id),
            &event,
        )
        .await;

        Some(participant)
    }
}
