//! Domain 層
//!
//! - `value_object`: 検証済みの値（RoomId, ConnectionId など）
//! - `entity`: Connection, Participant, WhiteboardAction, ChatMessage
//! - `repository`: Room Registry と外部ストアの trait
//! - `message_pusher`: クライアントへの送信の trait
//! - `auth`: 接続時の本人確認の trait
//! - `sequencer`: ホワイトボードのバージョン採番

pub mod auth;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod sequencer;
pub mod value_object;

pub use auth::IdentityVerifier;
pub use entity::{
    ActiveRoom, ChatMessage, Connection, Identity, NewChatMessage, Participant, WhiteboardAction,
    WhiteboardSubmission,
};
pub use error::{AuthError, MessagePushError, RegistryError, StoreError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ChatStore, JoinOutcome, LeaveOutcome, RoomRegistry, WhiteboardStore};
pub use sequencer::{SequencedAction, WhiteboardSequencer};
pub use value_object::{
    ChatMessageType, ConnectionId, MediaKind, MessageBody, RoomId, Timestamp, UserId, Username,
    Version, WhiteboardActionKind,
};
