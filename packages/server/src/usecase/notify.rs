//! ServerEvent の送信ヘルパー

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Participant},
    infrastructure::dto::websocket::ServerEvent,
};

/// 1 つの接続にイベントを送信
pub(crate) async fn push_event(
    pusher: &dyn MessagePusher,
    to: &ConnectionId,
    event: &ServerEvent,
) -> Result<(), MessagePushError> {
    let json = event
        .to_json()
        .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
    pusher.push_to(to, &json).await
}

/// 複数の接続にイベントを送信（失敗はログのみ）
pub(crate) async fn broadcast_event(
    pusher: &dyn MessagePusher,
    targets: Vec<ConnectionId>,
    event: &ServerEvent,
) {
    if targets.is_empty() {
        return;
    }
    let json = match event.to_json() {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize server event: {}", e);
            return;
        }
    };
    if let Err(e) = pusher.broadcast(targets, &json).await {
        tracing::warn!("Failed to broadcast server event: {}", e);
    }
}

/// `exclude` 以外の参加者の接続 ID
pub(crate) fn others(participants: &[Participant], exclude: &ConnectionId) -> Vec<ConnectionId> {
    participants
        .iter()
        .map(|p| p.connection_id)
        .filter(|id| id != exclude)
        .collect()
}

/// 全参加者の接続 ID
pub(crate) fn everyone(participants: &[Participant]) -> Vec<ConnectionId> {
    participants.iter().map(|p| p.connection_id).collect()
}
