//! Whiteboard Sequencer
//!
//! ルームごとにホワイトボード操作のバージョンを採番する。
//!
//! ## 採番の仕組み
//!
//! ルームごとに 1 つの非同期 Mutex（採番ポイント）を持ち、最後に採番した
//! バージョンをキャッシュする。Mutex は「最大バージョンの取得 → 追記」の間
//! 保持されるため、同じルームで 2 つの操作が同じバージョンを得ることはない。
//!
//! - キャッシュが空なら外部ストアの最大バージョンから読み込む
//! - 追記に失敗した場合キャッシュは進めない（欠番は生じない）
//! - 採番ポイントは Room Registry のロックとも他ルームとも独立
//! - `submit` は採番ポイントを保持したままの `SequencedAction` を返す。呼び出し側は
//!   これを保持したまま配信することで、配信順をバージョン順に揃える

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{RoomId, StoreError, Version, WhiteboardAction, WhiteboardStore, WhiteboardSubmission};

type SequencingPoint = Arc<Mutex<Option<Version>>>;

/// 採番・永続化済みの操作
///
/// drop されるまで同じルームの次の採番は待たされる。
pub struct SequencedAction {
    action: WhiteboardAction,
    _point: OwnedMutexGuard<Option<Version>>,
}

impl SequencedAction {
    pub fn action(&self) -> &WhiteboardAction {
        &self.action
    }

    /// 操作を取り出し、採番ポイントを解放する
    pub fn into_action(self) -> WhiteboardAction {
        self.action
    }
}

pub struct WhiteboardSequencer {
    store: Arc<dyn WhiteboardStore>,
    /// ルームごとの採番ポイント（最後に採番したバージョン）
    points: DashMap<RoomId, SequencingPoint>,
}

impl WhiteboardSequencer {
    pub fn new(store: Arc<dyn WhiteboardStore>) -> Self {
        Self {
            store,
            points: DashMap::new(),
        }
    }

    fn sequencing_point(&self, room_id: &RoomId) -> SequencingPoint {
        self.points.entry(room_id.clone()).or_default().clone()
    }

    /// 操作にバージョンを採番して永続化する
    ///
    /// # Errors
    ///
    /// 外部ストアの読み込み・追記に失敗した場合 `StoreError`。その場合
    /// バージョンは消費されない。
    pub async fn submit(
        &self,
        room_id: &RoomId,
        submission: WhiteboardSubmission,
    ) -> Result<SequencedAction, StoreError> {
        let point = self.sequencing_point(room_id);
        let mut last_version = point.lock_owned().await;

        let current = match *last_version {
            Some(version) => version,
            None => self.store.find_max_version(room_id).await?,
        };

        let action = WhiteboardAction::from_submission(room_id.clone(), current.next(), submission);
        self.store.append(action.clone()).await?;
        *last_version = Some(action.version);

        tracing::debug!(
            "Assigned whiteboard version {} in room '{}'",
            action.version.value(),
            room_id
        );

        Ok(SequencedAction {
            action,
            _point: last_version,
        })
    }

    /// `from_version` より新しい操作を昇順で取得（何度呼んでも同じ結果）
    pub async fn history(
        &self,
        room_id: &RoomId,
        from_version: Version,
    ) -> Result<Vec<WhiteboardAction>, StoreError> {
        self.store.find_range(room_id, from_version).await
    }

    /// 使われていない採番ポイントを破棄する
    ///
    /// 誰かが採番中（Arc を保持中）なら残す。破棄後は次回の採番時に
    /// ストアから最大バージョンを読み直す。
    pub fn release(&self, room_id: &RoomId) {
        if self
            .points
            .remove_if(room_id, |_, point| Arc::strong_count(point) == 1)
            .is_some()
        {
            tracing::debug!("Released whiteboard sequencing point for room '{}'", room_id);
        }
    }

    #[cfg(test)]
    fn tracked_rooms(&self) -> usize {
        self.points.len()
    }
}
