//! InMemory Whiteboard Store 実装
//!
//! 外部ストアの代わりにプロセス内でホワイトボード操作を保持する。
//! 追記は「直前のバージョン + 1」のみ受け付ける（比較して追記）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RoomId, StoreError, Version, WhiteboardAction, WhiteboardStore};

/// インメモリ Whiteboard Store 実装
#[derive(Default)]
pub struct InMemoryWhiteboardStore {
    /// room_id → バージョン昇順の操作列
    actions: Mutex<HashMap<RoomId, Vec<WhiteboardAction>>>,
}

impl InMemoryWhiteboardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WhiteboardStore for InMemoryWhiteboardStore {
    async fn append(&self, action: WhiteboardAction) -> Result<(), StoreError> {
        let mut actions = self.actions.lock().await;
        let history = actions.entry(action.room_id.clone()).or_default();

        let expected = history
            .last()
            .map(|last| last.version)
            .unwrap_or(Version::ZERO)
            .next();
        if action.version != expected {
            return Err(StoreError::VersionConflict {
                room_id: action.room_id.to_string(),
                version: action.version.value(),
            });
        }

        history.push(action);
        Ok(())
    }

    async fn find_max_version(&self, room_id: &RoomId) -> Result<Version, StoreError> {
        let actions = self.actions.lock().await;
        Ok(actions
            .get(room_id)
            .and_then(|history| history.last())
            .map(|last| last.version)
            .unwrap_or(Version::ZERO))
    }

    async fn find_range(
        &self,
        room_id: &RoomId,
        from_version: Version,
    ) -> Result<Vec<WhiteboardAction>, StoreError> {
        let actions = self.actions.lock().await;
        Ok(actions
            .get(room_id)
            .map(|history| {
                history
                    .iter()
                    .filter(|action| action.version > from_version)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
