//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//!
//! ## 排他制御
//!
//! ルームは `DashMap` に保持し、1 つのルームへの変更はそのシャードのロックの
//! 中で完結させる。ロックを持ったままブロードキャストすることはない
//! （送信先のスナップショットを返し、送信は呼び出し側が行う）。
//!
//! ロックの取得順は常に `rooms` → `memberships`。逆順で取得する経路は無い。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::domain::{
    ActiveRoom, ConnectionId, JoinOutcome, LeaveOutcome, MediaKind, Participant, RegistryError,
    RoomId, RoomRegistry,
};

type Participants = HashMap<ConnectionId, Participant>;

/// インメモリ Room Registry 実装
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    /// room_id → 参加者（参加者 0 人のルームは保持しない）
    rooms: DashMap<RoomId, Participants>,
    /// connection_id → 参加中のルーム（切断時の後片付け用の索引）
    memberships: DashMap<ConnectionId, HashSet<RoomId>>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(participants: impl Iterator<Item = Participant>) -> Vec<Participant> {
        let mut participants: Vec<Participant> = participants.collect();
        participants.sort_by(|a, b| a.connection_id.cmp(&b.connection_id));
        participants
    }

    fn forget_membership(&self, room_id: &RoomId, connection_id: &ConnectionId) {
        let now_empty = match self.memberships.get_mut(connection_id) {
            Some(mut rooms) => {
                rooms.remove(room_id);
                rooms.is_empty()
            }
            None => false,
        };
        // get_mut の参照を解放してから削除する（同じシャードでのデッドロック回避）
        if now_empty {
            self.memberships
                .remove_if(connection_id, |_, rooms| rooms.is_empty());
        }
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, room_id: &RoomId, participant: Participant) -> JoinOutcome {
        let connection_id = participant.connection_id;
        let mut room = self.rooms.entry(room_id.clone()).or_default();

        let newly_joined = !room.contains_key(&connection_id);
        let participant = room.entry(connection_id).or_insert(participant).clone();
        let others = Self::sorted(
            room.values()
                .filter(|p| p.connection_id != connection_id)
                .cloned(),
        );

        self.memberships
            .entry(connection_id)
            .or_default()
            .insert(room_id.clone());
        drop(room);

        if newly_joined {
            tracing::debug!(
                "Connection '{}' joined room '{}' ({} others)",
                connection_id,
                room_id,
                others.len()
            );
        } else {
            tracing::debug!(
                "Connection '{}' re-affirmed membership of room '{}'",
                connection_id,
                room_id
            );
        }

        JoinOutcome {
            participant,
            others,
            newly_joined,
        }
    }

    async fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> Option<LeaveOutcome> {
        let outcome = match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(mut room) => {
                let participant = room.get_mut().remove(connection_id)?;
                let remaining = Self::sorted(room.get().values().cloned());
                let room_closed = remaining.is_empty();
                if room_closed {
                    room.remove();
                }
                self.forget_membership(room_id, connection_id);
                LeaveOutcome {
                    participant,
                    remaining,
                    room_closed,
                }
            }
            Entry::Vacant(_) => return None,
        };

        tracing::debug!(
            "Connection '{}' left room '{}' ({} remaining)",
            connection_id,
            room_id,
            outcome.remaining.len()
        );
        if outcome.room_closed {
            tracing::info!("Room '{}' is now empty and removed", room_id);
        }

        Some(outcome)
    }

    async fn set_media(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        kind: MediaKind,
        enabled: bool,
    ) -> Result<Participant, RegistryError> {
        let not_found = || RegistryError::ParticipantNotFound {
            room_id: room_id.to_string(),
            connection_id: connection_id.to_string(),
        };

        let mut room = self.rooms.get_mut(room_id).ok_or_else(not_found)?;
        let participant = room.get_mut(connection_id).ok_or_else(not_found)?;
        participant.set_media(kind, enabled);
        Ok(participant.clone())
    }

    async fn snapshot(&self, room_id: &RoomId) -> Vec<Participant> {
        self.rooms
            .get(room_id)
            .map(|room| Self::sorted(room.values().cloned()))
            .unwrap_or_default()
    }

    async fn find_participant(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Option<Participant> {
        self.rooms
            .get(room_id)
            .and_then(|room| room.get(connection_id).cloned())
    }

    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomId> {
        let mut rooms: Vec<RoomId> = self
            .memberships
            .get(connection_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default();
        rooms.sort();
        rooms
    }

    async fn list_rooms(&self) -> Vec<ActiveRoom> {
        let mut rooms: Vec<ActiveRoom> = self
            .rooms
            .iter()
            .map(|room| ActiveRoom {
                id: room.key().clone(),
                participants: Self::sorted(room.value().values().cloned()),
            })
            .collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }
}
