//! ルームごとの参加・退出の直列化
//!
//! Registry の変更とそれに伴う通知（existing-participants / participant-joined /
//! participant-left）を 1 つの区間として扱う。同じルームの区間は重ならないため、
//! どのクライアントも Registry の変更順どおりに通知を受け取る。
//! 区間内の送信は unbounded チャンネルへの投入のみで待ちは発生しない。

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::RoomId;

#[derive(Default)]
pub struct RoomGate {
    locks: DashMap<RoomId, Arc<Mutex<()>>>,
}

impl RoomGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームの区間に入る。ガードを drop するまで同じルームの他の区間は待つ
    pub async fn enter(&self, room_id: &RoomId) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(room_id.clone()).or_default().clone();
        lock.lock_owned().await
    }

    /// 誰も使っていないルームのロックを破棄する
    pub fn release(&self, room_id: &RoomId) {
        self.locks
            .remove_if(room_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    #[cfg(test)]
    pub(crate) fn tracked_rooms(&self) -> usize {
        self.locks.len()
    }
}
