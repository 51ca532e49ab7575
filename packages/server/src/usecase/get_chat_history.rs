//! UseCase: チャット履歴の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{ChatMessage, ChatStore, RoomId, Timestamp};

use super::SignalingError;

/// `limit` 省略時の件数
pub const DEFAULT_CHAT_HISTORY_LIMIT: usize = 50;
/// 1 回で返す最大件数
pub const MAX_CHAT_HISTORY_LIMIT: usize = 200;

pub struct GetChatHistoryUseCase {
    chat_store: Arc<dyn ChatStore>,
}

impl GetChatHistoryUseCase {
    pub fn new(chat_store: Arc<dyn ChatStore>) -> Self {
        Self { chat_store }
    }

    /// `before` より前の最新 `limit` 件を古い順に返す
    pub async fn execute(
        &self,
        room_id: &RoomId,
        limit: Option<usize>,
        before: Option<Timestamp>,
    ) -> Result<Vec<ChatMessage>, SignalingError> {
        let limit = limit
            .unwrap_or(DEFAULT_CHAT_HISTORY_LIMIT)
            .clamp(1, MAX_CHAT_HISTORY_LIMIT);
        self.chat_store
            .find_recent(room_id, limit, before)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to load chat history of room '{}': {}", room_id, e);
                SignalingError::Persistence("failed to load chat history".to_string())
            })
    }
}
