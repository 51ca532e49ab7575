//! UseCase: 画面共有の開始・停止の通知

use std::sync::Arc;

use crate::{
    domain::{Connection, MessagePusher, RoomId, RoomRegistry},
    infrastructure::dto::websocket::{
        ScreenShareStartedMessage, ScreenShareStoppedMessage, ServerEvent,
    },
};

use super::{
    SignalingError,
    membership::require_participant,
    notify::{broadcast_event, others},
};

pub struct ScreenShareUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ScreenShareUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    pub async fn start(&self, connection: &Connection, room_id: &RoomId) -> Result<(), SignalingError> {
        let participant = require_participant(self.registry.as_ref(), room_id, connection).await?;
        let event = ServerEvent::ParticipantScreenShareStarted(ScreenShareStartedMessage {
            connection_id: connection.id.to_string(),
            user_id: participant.user_id.into_string(),
            username: participant.username.into_string(),
        });
        self.notify_others(connection, room_id, &event).await;
        Ok(())
    }

    pub async fn stop(&self, connection: &Connection, room_id: &RoomId) -> Result<(), SignalingError> {
        require_participant(self.registry.as_ref(), room_id, connection).await?;
        let event = ServerEvent::ParticipantScreenShareStopped(ScreenShareStoppedMessage {
            connection_id: connection.id.to_string(),
        });
        self.notify_others(connection, room_id, &event).await;
        Ok(())
    }

    async fn notify_others(&self, connection: &Connection, room_id: &RoomId, event: &ServerEvent) {
        let participants = self.registry.snapshot(room_id).await;
        broadcast_event(
            self.message_pusher.as_ref(),
            others(&participants, &connection.id),
            event,
        )
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Participant,
        usecase::test_support::{TestClient, connect, pusher, registry, room},
    };

    async fn join(registry: &dyn RoomRegistry, client: &mut TestClient, id: &str) {
        let participant = Participant::new(client.id(), &client.connection.identity);
        registry.join(&room(id), participant).await;
        client.connection.enter_room(room(id));
    }

    #[tokio::test]
    async fn test_start_and_stop_notify_others() {
        // テスト項目: 画面共有の開始・停止が他の参加者に順に通知される
        // given (前提条件):
        let registry = registry();
        let message_pusher = pusher();
        let usecase = ScreenShareUseCase::new(registry.clone(), message_pusher.clone());
        let mut alice = connect(message_pusher.as_ref(), "alice").await;
        let mut bob = connect(message_pusher.as_ref(), "bob").await;
        join(registry.as_ref(), &mut alice, "r1").await;
        join(registry.as_ref(), &mut bob, "r1").await;

        // when (操作):
        usecase.start(&alice.connection, &room("r1")).await.unwrap();
        usecase.stop(&alice.connection, &room("r1")).await.unwrap();

        // then (期待する結果):
        let events = bob.events();
        assert!(matches!(
            events.as_slice(),
            [
                ServerEvent::ParticipantScreenShareStarted(started),
                ServerEvent::ParticipantScreenShareStopped(_),
            ] if started.username == "alice"
        ));
        assert!(alice.events().is_empty());
    }

    #[tokio::test]
    async fn test_screen_share_outside_room_is_rejected() {
        // テスト項目: 参加していないルームへの画面共有通知はエラー
        // given (前提条件):
        let registry = registry();
        let message_pusher = pusher();
        let usecase = ScreenShareUseCase::new(registry.clone(), message_pusher.clone());
        let alice = connect(message_pusher.as_ref(), "alice").await;

        // when (操作):
        let result = usecase.start(&alice.connection, &room("r1")).await;

        // then (期待する結果):
        assert_eq!(result, Err(SignalingError::not_in_room(&room("r1"))));
    }
}
