//! UseCase: アクティブなルームの参照（HTTP API 用）

use std::sync::Arc;

use crate::domain::{ActiveRoom, RoomId, RoomRegistry};

use super::GetRoomDetailError;

/// アクティブなルームの一覧を取得
pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> Vec<ActiveRoom> {
        self.registry.list_rooms().await
    }
}

/// ルームの詳細（参加者一覧）を取得
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 参加者のいないルームは存在しないものとして扱う
    pub async fn execute(&self, room_id: &RoomId) -> Result<ActiveRoom, GetRoomDetailError> {
        let participants = self.registry.snapshot(room_id).await;
        if participants.is_empty() {
            return Err(GetRoomDetailError::RoomNotFound);
        }
        Ok(ActiveRoom {
            id: room_id.clone(),
            participants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, Participant},
        usecase::test_support::{identity, registry, room},
    };

    #[tokio::test]
    async fn test_get_rooms_lists_active_rooms() {
        // テスト項目: 参加者のいるルームだけが一覧に出る
        // given (前提条件):
        let registry = registry();
        let usecase = GetRoomsUseCase::new(registry.clone());
        let alice = ConnectionId::generate();
        registry
            .join(&room("r1"), Participant::new(alice, &identity("alice")))
            .await;
        registry
            .join(&room("r2"), Participant::new(ConnectionId::generate(), &identity("bob")))
            .await;
        registry.leave(&room("r1"), &alice).await;

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, room("r2"));
        assert_eq!(rooms[0].participants.len(), 1);
    }

    #[tokio::test]
    async fn test_get_room_detail_of_unknown_room() {
        // テスト項目: 存在しないルームの詳細は RoomNotFound
        // given (前提条件):
        let usecase = GetRoomDetailUseCase::new(registry());

        // when (操作):
        let result = usecase.execute(&room("nowhere")).await;

        // then (期待する結果):
        assert_eq!(result, Err(GetRoomDetailError::RoomNotFound));
    }

    #[tokio::test]
    async fn test_get_room_detail_returns_participants() {
        // テスト項目: ルームの詳細に参加者が含まれる
        // given (前提条件):
        let registry = registry();
        let usecase = GetRoomDetailUseCase::new(registry.clone());
        registry
            .join(&room("r1"), Participant::new(ConnectionId::generate(), &identity("alice")))
            .await;

        // when (操作):
        let detail = usecase.execute(&room("r1")).await.unwrap();

        // then (期待する結果):
        assert_eq!(detail.participants.len(), 1);
        assert_eq!(detail.participants[0].username.as_str(), "alice");
    }
}
