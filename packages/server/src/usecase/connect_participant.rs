//! UseCase: 接続の受け入れ
//!
//! トークンを検証して Connection を作成し、送信チャンネルを登録する。
//! 検証に失敗した接続は Room Registry にも MessagePusher にも到達しない。

use std::sync::Arc;

use crate::{
    domain::{
        AuthError, Connection, ConnectionId, Identity, IdentityVerifier, MessagePusher,
        PusherChannel,
    },
    infrastructure::dto::websocket::ServerEvent,
};

use super::notify::push_event;

/// 接続受け入れのユースケース
pub struct ConnectParticipantUseCase {
    verifier: Arc<dyn IdentityVerifier>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(verifier: Arc<dyn IdentityVerifier>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            verifier,
            message_pusher,
        }
    }

    /// アップグレード前にトークンを検証
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        self.verifier.verify(token).await
    }

    /// Connection を作成し、送信チャンネルを登録して `connected` を通知
    ///
    /// ConnectionId は接続ごとに新しく採番する。同じユーザーが複数の端末から
    /// 接続しても別の Connection になる。
    pub async fn execute(&self, identity: Identity, sender: PusherChannel) -> Connection {
        let connection = Connection::new(ConnectionId::generate(), identity);
        self.message_pusher
            .register_client(connection.id, sender)
            .await;

        let event = ServerEvent::Connected(connection.clone().into());
        if let Err(e) = push_event(self.message_pusher.as_ref(), &connection.id, &event).await {
            tracing::warn!("Failed to send connected event to {}: {}", connection.id, e);
        }

        tracing::info!(
            "Connection {} accepted for user '{}'",
            connection.id,
            connection.identity.username.as_str()
        );
        connection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::auth::MockIdentityVerifier,
        usecase::test_support::{identity, pusher},
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_authenticate_delegates_to_verifier() {
        // テスト項目: authenticate は検証結果の Identity をそのまま返す
        // given (前提条件):
        let mut verifier = MockIdentityVerifier::new();
        verifier
            .expect_verify()
            .withf(|token| token == "good")
            .returning(|_| Ok(identity("alice")));
        let usecase = ConnectParticipantUseCase::new(Arc::new(verifier), pusher());

        // when (操作):
        let result = usecase.authenticate("good").await;

        // then (期待する結果):
        assert_eq!(result, Ok(identity("alice")));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_invalid_token() {
        // テスト項目: 検証に失敗したトークンはエラーになり、クライアントは登録されない
        // given (前提条件):
        let mut verifier = MockIdentityVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Err(AuthError::AuthenticationFailed("bad signature".to_string())));
        let message_pusher = pusher();
        let usecase = ConnectParticipantUseCase::new(Arc::new(verifier), message_pusher.clone());

        // when (操作):
        let result = usecase.authenticate("bad").await;

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(message_pusher.client_count(), 0);
    }

    #[tokio::test]
    async fn test_execute_registers_client_and_sends_connected() {
        // テスト項目: 接続すると送信チャンネルが登録され、connected が届く
        // given (前提条件):
        let message_pusher = pusher();
        let usecase =
            ConnectParticipantUseCase::new(Arc::new(MockIdentityVerifier::new()), message_pusher.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let connection = usecase.execute(identity("alice"), tx).await;

        // then (期待する結果):
        assert_eq!(message_pusher.client_count(), 1);
        assert_eq!(connection.current_room(), None);
        let event: ServerEvent = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        let ServerEvent::Connected(message) = event else {
            panic!("unexpected event: {:?}", event);
        };
        assert_eq!(message.connection_id, connection.id.to_string());
        assert_eq!(message.username, "alice");
    }

    #[tokio::test]
    async fn test_same_user_gets_distinct_connections() {
        // テスト項目: 同じユーザーの 2 つの接続は別の ConnectionId を持つ
        // given (前提条件):
        let message_pusher = pusher();
        let usecase =
            ConnectParticipantUseCase::new(Arc::new(MockIdentityVerifier::new()), message_pusher.clone());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        let first = usecase.execute(identity("alice"), tx1).await;
        let second = usecase.execute(identity("alice"), tx2).await;

        // then (期待する結果):
        assert_ne!(first.id, second.id);
        assert_eq!(message_pusher.client_count(), 2);
    }
}
