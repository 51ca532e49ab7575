//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断時に参加中の全ルームから退出し、送信チャンネルを登録解除すること
//!
//! ### なぜこのテストが必要か
//! - 切断した参加者が Registry に残ると、他の参加者の一覧に幽霊が残る
//! - 残りの参加者が participant-left を受け取れないとピア接続が片付かない
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加中のルームから退出して通知
//! - エッジケース：どのルームにも参加していない接続の切断

use std::sync::Arc;

use crate::domain::{Connection, MessagePusher, RoomId, RoomRegistry};

use super::LeaveRoomUseCase;

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    leave_room: Arc<LeaveRoomUseCase>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        leave_room: Arc<LeaveRoomUseCase>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            leave_room,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 実際に退出したルームの一覧
    pub async fn execute(&self, connection: &mut Connection) -> Vec<RoomId> {
        let mut rooms = self.registry.rooms_of(&connection.id).await;
        if let Some(current) = connection.current_room().cloned()
            && !rooms.contains(&current)
        {
            rooms.push(current);
        }

        let mut left = Vec::new();
        for room_id in rooms {
            if self.leave_room.execute(connection, &room_id).await.is_some() {
                left.push(room_id);
            }
        }

        self.message_pusher.unregister_client(&connection.id).await;
        tracing::info!(
            "Connection {} closed (left {} room(s))",
            connection.id,
            left.len()
        );
        left
    }
}
