//! InMemory Chat Store 実装
//!
//! 外部ストアの代わりにプロセス内でチャットメッセージを保持する。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{ChatMessage, ChatStore, NewChatMessage, RoomId, StoreError, Timestamp};

/// インメモリ Chat Store 実装
#[derive(Default)]
pub struct InMemoryChatStore {
    /// room_id → 保存順のメッセージ
    messages: Mutex<HashMap<RoomId, Vec<ChatMessage>>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn append(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let stored = ChatMessage::from_new(Uuid::new_v4().to_string(), message);

        let mut messages = self.messages.lock().await;
        messages
            .entry(stored.room_id.clone())
            .or_default()
            .push(stored.clone());

        Ok(stored)
    }

    async fn find_recent(
        &self,
        room_id: &RoomId,
        limit: usize,
        before: Option<Timestamp>,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let messages = self.messages.lock().await;
        let Some(history) = messages.get(room_id) else {
            return Ok(Vec::new());
        };

        let candidates: Vec<&ChatMessage> = history
            .iter()
            .filter(|m| before.is_none_or(|before| m.timestamp < before))
            .collect();
        let skip = candidates.len().saturating_sub(limit);

        Ok(candidates.into_iter().skip(skip).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatMessageType, MessageBody, UserId, Username};

    fn new_message(room: &str, body: &str, timestamp: i64) -> NewChatMessage {
        NewChatMessage {
            room_id: RoomId::new(room.to_string()).unwrap(),
            user_id: UserId::new("u1".to_string()).unwrap(),
            username: Username::new("alice".to_string()).unwrap(),
            message: MessageBody::new(body.to_string()).unwrap(),
            message_type: ChatMessageType::Text,
            reply_to: None,
            timestamp: Timestamp::new(timestamp),
        }
    }

    #[tokio::test]
    async fn test_append_assigns_unique_ids() {
        // テスト項目: 保存したメッセージには一意な ID が採番される
        // given (前提条件):
        let store = InMemoryChatStore::new();

        // when (操作):
        let first = store.append(new_message("r1", "hello", 1)).await.unwrap();
        let second = store.append(new_message("r1", "hello", 2)).await.unwrap();

        // then (期待する結果):
        assert_ne!(first.id, second.id);
        assert_eq!(first.message.as_str(), "hello");
    }

    #[tokio::test]
    async fn test_find_recent_returns_latest_in_chronological_order() {
        // テスト項目: find_recent は最新 limit 件を古い順で返す
        // given (前提条件):
        let store = InMemoryChatStore::new();
        for i in 1..=5 {
            store
                .append(new_message("r1", &format!("m{i}"), i * 10))
                .await
                .unwrap();
        }
        let r1 = RoomId::new("r1".to_string()).unwrap();

        // when (操作):
        let latest = store.find_recent(&r1, 2, None).await.unwrap();
        let before = store
            .find_recent(&r1, 2, Some(Timestamp::new(30)))
            .await
            .unwrap();

        // then (期待する結果):
        let bodies: Vec<&str> = latest.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(bodies, vec!["m4", "m5"]);
        let bodies: Vec<&str> = before.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(bodies, vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_find_recent_of_unknown_room_is_empty() {
        // テスト項目: メッセージの無いルームは空のリストを返す
        // given (前提条件):
        let store = InMemoryChatStore::new();

        // when (操作):
        let result = store
            .find_recent(&RoomId::new("r1".to_string()).unwrap(), 50, None)
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(Vec::new()));
    }
}
