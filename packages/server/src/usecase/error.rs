//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RoomId, ValueObjectError};

/// シグナリング系イベントの処理エラー
///
/// どちらも送信者に `error` イベントとして返し、接続は維持する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalingError {
    /// 不正なメッセージ（宛先なし、参加していないルームなど）
    #[error("{0}")]
    Validation(String),

    /// 外部ストアへの保存・読み込みに失敗（ブロードキャストはしない）
    #[error("{0}")]
    Persistence(String),
}

impl SignalingError {
    pub fn not_in_room(room_id: &RoomId) -> Self {
        Self::Validation(format!("not a participant of room '{}'", room_id))
    }
}

impl From<ValueObjectError> for SignalingError {
    fn from(e: ValueObjectError) -> Self {
        Self::Validation(e.to_string())
    }
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
