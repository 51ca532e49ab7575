//! エンティティ
//!
//! - `Connection`: WebSocket セッション 1 本。接続タスクが排他的に所有する
//! - `Participant`: ルーム内での Connection の姿（メディアの状態を含む）
//! - `WhiteboardAction`: 採番済みのホワイトボード操作（追記のみ）
//! - `ChatMessage`: 永続化済みのチャットメッセージ

use serde::Serialize;
use serde_json::Value;

use super::value_object::{
    ChatMessageType, ConnectionId, MediaKind, MessageBody, RoomId, Timestamp, UserId, Username,
    Version, WhiteboardActionKind,
};

/// 認証済みの本人情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: UserId,
    pub username: Username,
}

impl Identity {
    pub fn new(user_id: UserId, username: Username) -> Self {
        Self { user_id, username }
    }
}

/// WebSocket セッション
///
/// 参加中のルームは Connection 自身が保持する。全ルームを走査して
/// 所属を推測することはしない。
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub identity: Identity,
    current_room: Option<RoomId>,
}

impl Connection {
    pub fn new(id: ConnectionId, identity: Identity) -> Self {
        Self {
            id,
            identity,
            current_room: None,
        }
    }

    /// 参加中のルーム
    pub fn current_room(&self) -> Option<&RoomId> {
        self.current_room.as_ref()
    }

    /// 指定ルームに参加中か
    pub fn is_in(&self, room_id: &RoomId) -> bool {
        self.current_room.as_ref() == Some(room_id)
    }

    pub fn enter_room(&mut self, room_id: RoomId) {
        self.current_room = Some(room_id);
    }

    /// 指定ルームから抜けたことを記録（別のルームに参加中なら何もしない）
    pub fn exit_room(&mut self, room_id: &RoomId) {
        if self.is_in(room_id) {
            self.current_room = None;
        }
    }
}

/// ルーム参加者
///
/// 識別情報は不変。変更できるのはメディアのフラグのみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub user_id: UserId,
    pub username: Username,
    pub is_audio_enabled: bool,
    pub is_video_enabled: bool,
}

impl Participant {
    /// 音声・映像ともに有効な状態で参加者を作成
    pub fn new(connection_id: ConnectionId, identity: &Identity) -> Self {
        Self {
            connection_id,
            user_id: identity.user_id.clone(),
            username: identity.username.clone(),
            is_audio_enabled: true,
            is_video_enabled: true,
        }
    }

    pub fn set_media(&mut self, kind: MediaKind, enabled: bool) {
        match kind {
            MediaKind::Audio => self.is_audio_enabled = enabled,
            MediaKind::Video => self.is_video_enabled = enabled,
        }
    }
}

/// Registry 上でアクティブなルーム（参加者 1 人以上）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRoom {
    pub id: RoomId,
    pub participants: Vec<Participant>,
}

/// 採番前のホワイトボード操作
#[derive(Debug, Clone, PartialEq)]
pub struct WhiteboardSubmission {
    pub user_id: UserId,
    pub username: Username,
    pub kind: WhiteboardActionKind,
    pub payload: Value,
    pub timestamp: Timestamp,
}

/// 採番済みのホワイトボード操作
#[derive(Debug, Clone, PartialEq)]
pub struct WhiteboardAction {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub username: Username,
    pub kind: WhiteboardActionKind,
    pub payload: Value,
    pub version: Version,
    pub timestamp: Timestamp,
}

impl WhiteboardAction {
    pub fn from_submission(room_id: RoomId, version: Version, submission: WhiteboardSubmission) -> Self {
        Self {
            room_id,
            user_id: submission.user_id,
            username: submission.username,
            kind: submission.kind,
            payload: submission.payload,
            version,
            timestamp: submission.timestamp,
        }
    }
}

/// 永続化前のチャットメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub username: Username,
    pub message: MessageBody,
    pub message_type: ChatMessageType,
    pub reply_to: Option<String>,
    pub timestamp: Timestamp,
}

/// 永続化済みのチャットメッセージ（ID はストアが採番）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub username: Username,
    pub message: MessageBody,
    pub message_type: ChatMessageType,
    pub reply_to: Option<String>,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn from_new(id: String, message: NewChatMessage) -> Self {
        Self {
            id,
            room_id: message.room_id,
            user_id: message.user_id,
            username: message.username,
            message: message.message,
            message_type: message.message_type,
            reply_to: message.reply_to,
            timestamp: message.timestamp,
        }
    }
}
