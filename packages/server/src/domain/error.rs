//! Domain 層のエラー定義

use thiserror::Error;

/// 値オブジェクトの生成失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("room id must be at most {max} characters")]
    RoomIdTooLong { max: usize },

    #[error("invalid connection id: '{0}'")]
    InvalidConnectionId(String),

    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("message must not be empty")]
    EmptyMessage,

    #[error("message must be at most {max} characters")]
    MessageTooLong { max: usize },
}

/// 接続時の認証エラー（接続は拒否される）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
}

/// Room Registry の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("connection '{connection_id}' is not a participant of room '{room_id}'")]
    ParticipantNotFound {
        room_id: String,
        connection_id: String,
    },
}

/// 外部ストア（チャット・ホワイトボード）の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("version {version} conflicts with stored history of room '{room_id}'")]
    VersionConflict { room_id: String, version: u64 },
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not connected")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
