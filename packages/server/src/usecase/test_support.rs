//! ユースケースのテスト用ヘルパー

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::sync::{Notify, mpsc};

use crate::{
    domain::{
        ActiveRoom, Connection, ConnectionId, Identity, JoinOutcome, LeaveOutcome, MediaKind,
        MessagePusher, Participant, RegistryError, RoomId, RoomRegistry, UserId, Username,
    },
    infrastructure::{
        dto::websocket::ServerEvent, message_pusher::WebSocketMessagePusher,
        repository::InMemoryRoomRegistry,
    },
};

/// テスト用のクライアント（接続と受信チャンネル）
pub(crate) struct TestClient {
    pub connection: Connection,
    rx: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    /// これまでに受信したイベントを全て取り出す
    pub fn events(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(json) = self.rx.try_recv() {
            events.push(serde_json::from_str(&json).unwrap());
        }
        events
    }

    pub fn id(&self) -> ConnectionId {
        self.connection.id
    }
}

pub(crate) fn room(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

pub(crate) fn identity(name: &str) -> Identity {
    Identity::new(
        UserId::new(format!("user-{}", name)).unwrap(),
        Username::new(name.to_string()).unwrap(),
    )
}

pub(crate) fn registry() -> Arc<InMemoryRoomRegistry> {
    Arc::new(InMemoryRoomRegistry::new())
}

pub(crate) fn pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new())
}

/// クライアントを MessagePusher に登録
pub(crate) async fn connect(pusher: &dyn MessagePusher, name: &str) -> TestClient {
    let (tx, rx) = mpsc::unbounded_channel();
    let connection = Connection::new(ConnectionId::generate(), identity(name));
    pusher.register_client(connection.id, tx).await;
    TestClient { connection, rx }
}

/// 一時停止する Registry 操作
pub(crate) enum PausePoint {
    /// join の登録直後
    Join,
    /// snapshot の取得直後
    Snapshot,
}

/// 指定した操作の 1 回目だけ、`resume` が通知されるまで止まる Registry
///
/// 止まった時点で `paused` を通知する。
pub(crate) struct PausingRegistry {
    pub inner: InMemoryRoomRegistry,
    pub paused: Notify,
    pub resume: Notify,
    point: PausePoint,
    armed: AtomicBool,
}

impl PausingRegistry {
    pub fn new(point: PausePoint) -> Self {
        Self {
            inner: InMemoryRoomRegistry::new(),
            paused: Notify::new(),
            resume: Notify::new(),
            point,
            armed: AtomicBool::new(true),
        }
    }

    async fn pause_once(&self) {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.paused.notify_one();
            self.resume.notified().await;
        }
    }
}

#[async_trait]
impl RoomRegistry for PausingRegistry {
    async fn join(&self, room_id: &RoomId, participant: Participant) -> JoinOutcome {
        let outcome = self.inner.join(room_id, participant).await;
        if matches!(self.point, PausePoint::Join) {
            self.pause_once().await;
        }
        outcome
    }

    async fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> Option<LeaveOutcome> {
        self.inner.leave(room_id, connection_id).await
    }

    async fn set_media(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        kind: MediaKind,
        enabled: bool,
    ) -> Result<Participant, RegistryError> {
        self.inner
            .set_media(room_id, connection_id, kind, enabled)
            .await
    }

    async fn snapshot(&self, room_id: &RoomId) -> Vec<Participant> {
        let participants = self.inner.snapshot(room_id).await;
        if matches!(self.point, PausePoint::Snapshot) {
            self.pause_once().await;
        }
        participants
    }

    async fn find_participant(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Option<Participant> {
        self.inner.find_participant(room_id, connection_id).await
    }

    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomId> {
        self.inner.rooms_of(connection_id).await
    }

    async fn list_rooms(&self) -> Vec<ActiveRoom> {
        self.inner.list_rooms().await
    }
}
