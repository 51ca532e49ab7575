//! UseCase: ルームへの参加
//!
//! 1. 別のルームに参加中なら先にそちらから退出する
//! 2. Registry に参加者を登録する
//! 3. 参加者本人に existing-participants を送る
//! 4. 新規参加の場合のみ、他の参加者に participant-joined を通知する
//!
//! 既に参加済みのルームへの再参加は existing-participants の再送だけを行う。
//! 2〜4 は RoomGate の区間内で行うため、同じルームの退出通知と追い越し合わない。

use std::sync::Arc;

use crate::{
    domain::{Connection, JoinOutcome, MessagePusher, Participant, RoomId, RoomRegistry},
    infrastructure::dto::websocket::{ParticipantInfo, ServerEvent},
};

use super::{
    LeaveRoomUseCase, RoomGate,
    notify::{broadcast_event, everyone, push_event},
};

/// 参加のユースケース
pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    leave_room: Arc<LeaveRoomUseCase>,
    room_gate: Arc<RoomGate>,
}

impl JoinRoomUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        leave_room: Arc<LeaveRoomUseCase>,
        room_gate: Arc<RoomGate>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            leave_room,
            room_gate,
        }
    }

    pub async fn execute(&self, connection: &mut Connection, room_id: RoomId) -> JoinOutcome {
        if let Some(previous) = connection.current_room().cloned()
            && previous != room_id
        {
            tracing::debug!(
                "{} switches from room '{}' to '{}'",
                connection.id,
                previous,
                room_id
            );
            self.leave_room.execute(connection, &previous).await;
        }

        let _guard = self.room_gate.enter(&room_id).await;
        let participant = Participant::new(connection.id, &connection.identity);
        let outcome = self.registry.join(&room_id, participant).await;
        connection.enter_room(room_id.clone());

        let existing = ServerEvent::ExistingParticipants(
            outcome.others.iter().cloned().map(ParticipantInfo::from).collect(),
        );
        if let Err(e) = push_event(self.message_pusher.as_ref(), &connection.id, &existing).await {
            tracing::warn!(
                "Failed to send existing participants to {}: {}",
                connection.id,
                e
            );
        }

        if outcome.newly_joined {
            let joined = ServerEvent::ParticipantJoined(outcome.participant.clone().into());
            broadcast_event(self.message_pusher.as_ref(), everyone(&outcome.others), &joined).await;
            tracing::info!(
                "{} joined room '{}' ({} participants)",
                connection.id,
                room_id,
                outcome.others.len() + 1
            );
        } else {
            tracing::debug!("{} re-joined room '{}'", connection.id, room_id);
        }

        outcome
    }
}
