//! UseCase: ルームからの退出
//!
//! 残りの参加者に participant-left を通知する。最後の 1 人が抜けてルームが
//! 消えた場合はホワイトボードの採番ポイントも破棄する。
//! Registry の変更と通知は RoomGate の区間内で行い、同じルームへの参加と
//! 順序が入れ替わらないようにする。

use std::sync::Arc;

use crate::{
    domain::{
        Connection, ConnectionId, LeaveOutcome, MessagePusher, RoomId, RoomRegistry,
        WhiteboardSequencer,
    },
    infrastructure::dto::websocket::{ParticipantLeftMessage, ServerEvent},
};

use super::{
    RoomGate,
    notify::{broadcast_event, everyone},
};

/// 退出のユースケース
pub struct LeaveRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<WhiteboardSequencer>,
    room_gate: Arc<RoomGate>,
}

impl LeaveRoomUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<WhiteboardSequencer>,
        room_gate: Arc<RoomGate>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            sequencer,
            room_gate,
        }
    }

    /// 接続を指定ルームから退出させる
    ///
    /// 参加していなければ何もせず `None` を返す（2 回目の退出も同様）。
    pub async fn execute(
        &self,
        connection: &mut Connection,
        room_id: &RoomId,
    ) -> Option<LeaveOutcome> {
        let outcome = self.leave(&connection.id, room_id).await;
        connection.exit_room(room_id);
        outcome
    }

    async fn leave(&self, connection_id: &ConnectionId, room_id: &RoomId) -> Option<LeaveOutcome> {
        let guard = self.room_gate.enter(room_id).await;
        let Some(outcome) = self.registry.leave(room_id, connection_id).await else {
            tracing::debug!(
                "Ignoring leave of {} from room '{}': not a participant",
                connection_id,
                room_id
            );
            return None;
        };

        let event = ServerEvent::ParticipantLeft(ParticipantLeftMessage {
            connection_id: connection_id.to_string(),
        });
        broadcast_event(
            self.message_pusher.as_ref(),
            everyone(&outcome.remaining),
            &event,
        )
        .await;
        drop(guard);

        if outcome.room_closed {
            self.sequencer.release(room_id);
            self.room_gate.release(room_id);
            tracing::info!("Room '{}' closed", room_id);
        } else {
            tracing::info!(
                "{} left room '{}' ({} remaining)",
                connection_id,
                room_id,
                outcome.remaining.len()
            );
        }

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Participant,
        infrastructure::repository::InMemoryWhiteboardStore,
        usecase::test_support::{TestClient, connect, pusher, registry, room},
    };

    async fn join(registry: &dyn RoomRegistry, client: &mut TestClient, room_id: &RoomId) {
        let participant = Participant::new(client.id(), &client.connection.identity);
        registry.join(room_id, participant).await;
        client.connection.enter_room(room_id.clone());
    }

    fn create_usecase(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> LeaveRoomUseCase {
        let sequencer = Arc::new(WhiteboardSequencer::new(Arc::new(
            InMemoryWhiteboardStore::new(),
        )));
        LeaveRoomUseCase::new(registry, message_pusher, sequencer, Arc::new(RoomGate::new()))
    }

    #[tokio::test]
    async fn test_leave_notifies_remaining_participants() {
        // テスト項目: 退出すると残りの参加者に participant-left が届く
        // given (前提条件):
        let registry = registry();
        let message_pusher = pusher();
        let usecase = create_usecase(registry.clone(), message_pusher.clone());
        let r1 = room("r1");
        let mut alice = connect(message_pusher.as_ref(), "alice").await;
        let mut bob = connect(message_pusher.as_ref(), "bob").await;
        join(registry.as_ref(), &mut alice, &r1).await;
        join(registry.as_ref(), &mut bob, &r1).await;

        // when (操作):
        let outcome = usecase.execute(&mut alice.connection, &r1).await.unwrap();

        // then (期待する結果):
        assert!(!outcome.room_closed);
        assert_eq!(alice.connection.current_room(), None);
        assert_eq!(
            bob.events(),
            vec![ServerEvent::ParticipantLeft(ParticipantLeftMessage {
                connection_id: alice.id().to_string(),
            })]
        );
        assert!(alice.events().is_empty());
    }

    #[tokio::test]
    async fn test_leave_last_participant_closes_room() {
        // テスト項目: 最後の参加者が退出するとルームが消える
        // given (前提条件):
        let registry = registry();
        let message_pusher = pusher();
        let usecase = create_usecase(registry.clone(), message_pusher.clone());
        let r1 = room("r1");
        let mut alice = connect(message_pusher.as_ref(), "alice").await;
        join(registry.as_ref(), &mut alice, &r1).await;

        // when (操作):
        let outcome = usecase.execute(&mut alice.connection, &r1).await.unwrap();

        // then (期待する結果):
        assert!(outcome.room_closed);
        assert!(registry.list_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_second_leave_is_noop() {
        // テスト項目: 2 回目の退出は何も通知しない
        // given (前提条件):
        let registry = registry();
        let message_pusher = pusher();
        let usecase = create_usecase(registry.clone(), message_pusher.clone());
        let r1 = room("r1");
        let mut alice = connect(message_pusher.as_ref(), "alice").await;
        let mut bob = connect(message_pusher.as_ref(), "bob").await;
        join(registry.as_ref(), &mut alice, &r1).await;
        join(registry.as_ref(), &mut bob, &r1).await;
        usecase.execute(&mut alice.connection, &r1).await;
        bob.events();

        // when (操作):
        let outcome = usecase.execute(&mut alice.connection, &r1).await;

        // then (期待する結果):
        assert_eq!(outcome, None);
        assert!(bob.events().is_empty());
    }
}
