//! ルーム参加の確認

use crate::domain::{Connection, Participant, RoomId, RoomRegistry};

use super::SignalingError;

/// 接続が指定ルームの参加者であることを確認し、参加者情報を返す
pub(crate) async fn require_participant(
    registry: &dyn RoomRegistry,
    room_id: &RoomId,
    connection: &Connection,
) -> Result<Participant, SignalingError> {
    registry
        .find_participant(room_id, &connection.id)
        .await
        .ok_or_else(|| SignalingError::not_in_room(room_id))
}
