//! UseCase: 入力中インジケーターの通知

use std::sync::Arc;

use crate::{
    domain::{Connection, MessagePusher, RoomId, RoomRegistry},
    infrastructure::dto::websocket::{ServerEvent, UserStoppedTypingMessage, UserTypingMessage},
};

use super::{
    SignalingError,
    membership::require_participant,
    notify::{broadcast_event, others},
};

pub struct NotifyTypingUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl NotifyTypingUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    pub async fn start(&self, connection: &Connection, room_id: &RoomId) -> Result<(), SignalingError> {
        let participant = require_participant(self.registry.as_ref(), room_id, connection).await?;
        let event = ServerEvent::UserTyping(UserTypingMessage {
            user_id: participant.user_id.into_string(),
            username: participant.username.into_string(),
        });
        self.notify_others(connection, room_id, &event).await;
        Ok(())
    }

    pub async fn stop(&self, connection: &Connection, room_id: &RoomId) -> Result<(), SignalingError> {
        let participant = require_participant(self.registry.as_ref(), room_id, connection).await?;
        let event = ServerEvent::UserStoppedTyping(UserStoppedTypingMessage {
            user_id: participant.user_id.into_string(),
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
        usecase::test_support::{connect, pusher, registry, room},
    };

    #[tokio::test]
    async fn test_typing_is_sent_to_others_only() {
        // テスト項目: 入力中の通知は本人以外に届く
        // given (前提条件):
        let registry = registry();
        let message_pusher = pusher();
        let usecase = NotifyTypingUseCase::new(registry.clone(), message_pusher.clone());
        let mut alice = connect(message_pusher.as_ref(), "alice").await;
        let mut bob = connect(message_pusher.as_ref(), "bob").await;
        for client in [&alice, &bob] {
            let participant = Participant::new(client.id(), &client.connection.identity);
            registry.join(&room("r1"), participant).await;
        }

        // when (操作):
        usecase.start(&alice.connection, &room("r1")).await.unwrap();
        usecase.stop(&alice.connection, &room("r1")).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            bob.events(),
            vec![
                ServerEvent::UserTyping(UserTypingMessage {
                    user_id: "user-alice".to_string(),
                    username: "alice".to_string(),
                }),
                ServerEvent::UserStoppedTyping(UserStoppedTypingMessage {
                    user_id: "user-alice".to_string(),
                }),
            ]
        );
        assert!(alice.events().is_empty());
    }
}
