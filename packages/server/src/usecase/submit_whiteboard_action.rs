//! UseCase: ホワイトボード操作の送信
//!
//! Sequencer でバージョンを採番・永続化し、送信者以外の参加者に
//! whiteboard-update を配信する。送信者は自分の操作を既に描画している。
//! 配信は採番ポイントを保持したまま行うため、各参加者にはバージョン順に届く。

use std::sync::Arc;

use huddle_shared::time::Clock;
use serde_json::Value;

use crate::{
    domain::{
        Connection, MessagePusher, RoomId, RoomRegistry, Timestamp, WhiteboardAction,
        WhiteboardActionKind, WhiteboardSequencer, WhiteboardSubmission,
    },
    infrastructure::dto::websocket::ServerEvent,
};

use super::{
    SignalingError,
    membership::require_participant,
    notify::{broadcast_event, others},
};

pub struct SubmitWhiteboardActionUseCase {
    registry: Arc<dyn RoomRegistry>,
    sequencer: Arc<WhiteboardSequencer>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SubmitWhiteboardActionUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        sequencer: Arc<WhiteboardSequencer>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            sequencer,
            message_pusher,
            clock,
        }
    }

    /// # Errors
    ///
    /// - 参加していないルームへの送信は `SignalingError::Validation`
    /// - 永続化に失敗した場合は `SignalingError::Persistence`（バージョンは消費されない）
    pub async fn execute(
        &self,
        connection: &Connection,
        room_id: &RoomId,
        kind: WhiteboardActionKind,
        payload: Value,
    ) -> Result<WhiteboardAction, SignalingError> {
        let participant = require_participant(self.registry.as_ref(), room_id, connection).await?;

        let submission = WhiteboardSubmission {
            user_id: participant.user_id,
            username: participant.username,
            kind,
            payload,
            timestamp: Timestamp::new(self.clock.now_millis()),
        };
        let sequenced = self
            .sequencer
            .submit(room_id, submission)
            .await
            .map_err(|e| {
                tracing::warn!(
                    "Failed to store whiteboard action in room '{}': {}",
                    room_id,
                    e
                );
                SignalingError::Persistence("failed to update whiteboard".to_string())
            })?;

        let participants = self.registry.snapshot(room_id).await;
        let event = ServerEvent::WhiteboardUpdate(sequenced.action().clone().into());
        broadcast_event(
            self.message_pusher.as_ref(),
            others(&participants, &connection.id),
            &event,
        )
        .await;

        Ok(sequenced.into_action())
    }
}
