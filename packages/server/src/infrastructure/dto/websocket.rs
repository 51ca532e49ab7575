//! WebSocket message DTOs.
//!
//! Every frame is a JSON text message of the form
//! `{"event": "<kebab-case name>", "data": {...}}` with camelCase fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{ChatMessageType, MediaKind, WhiteboardActionKind};

// ========================================
// Client → Server
// ========================================

/// Events sent by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinRoom(RoomRequest),
    LeaveRoom(RoomRequest),
    Offer(OfferRequest),
    Answer(AnswerRequest),
    IceCandidate(IceCandidateRequest),
    ToggleMedia(ToggleMediaRequest),
    StartScreenShare(RoomRequest),
    StopScreenShare(RoomRequest),
    ChatMessage(ChatMessageRequest),
    TypingStart(RoomRequest),
    TypingStop(RoomRequest),
    WhiteboardDraw(WhiteboardDrawRequest),
    WhiteboardGetHistory(WhiteboardHistoryRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    pub room_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRequest {
    pub to: String,
    pub offer: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub to: String,
    pub answer: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidateRequest {
    pub to: String,
    pub candidate: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleMediaRequest {
    pub room_id: String,
    pub kind: MediaKind,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    pub room_id: String,
    pub message: String,
    #[serde(default)]
    pub message_type: ChatMessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardDrawRequest {
    pub room_id: String,
    pub action: WhiteboardActionKind,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardHistoryRequest {
    pub room_id: String,
    /// 負の値は 0 として扱う
    #[serde(default)]
    pub from_version: i64,
}

// ========================================
// Server → Client
// ========================================

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    Connected(ConnectedMessage),
    ExistingParticipants(Vec<ParticipantInfo>),
    ParticipantJoined(ParticipantInfo),
    ParticipantLeft(ParticipantLeftMessage),
    ParticipantMediaChanged(MediaChangedMessage),
    ParticipantScreenShareStarted(ScreenShareStartedMessage),
    ParticipantScreenShareStopped(ScreenShareStoppedMessage),
    Offer(ForwardedOffer),
    Answer(ForwardedAnswer),
    IceCandidate(ForwardedIceCandidate),
    ChatMessage(ChatMessageInfo),
    UserTyping(UserTypingMessage),
    UserStoppedTyping(UserStoppedTypingMessage),
    WhiteboardUpdate(WhiteboardActionInfo),
    WhiteboardHistory(WhiteboardHistoryMessage),
    Error(ErrorMessage),
}

impl ServerEvent {
    /// Serialize into a text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Sent once after the upgrade so the client learns its own connection id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub connection_id: String,
    pub user_id: String,
    pub username: String,
}

/// Participant information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    pub connection_id: String,
    pub user_id: String,
    pub username: String,
    pub is_audio_enabled: bool,
    pub is_video_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantLeftMessage {
    pub connection_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaChangedMessage {
    pub connection_id: String,
    pub kind: MediaKind,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenShareStartedMessage {
    pub connection_id: String,
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenShareStoppedMessage {
    pub connection_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardedOffer {
    pub from: String,
    pub offer: Value,
    pub participant: ParticipantInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardedAnswer {
    pub from: String,
    pub answer: Value,
    pub participant: ParticipantInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardedIceCandidate {
    pub from: String,
    pub candidate: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageInfo {
    pub id: String,
    pub room_id: String,
    pub user_id: String,
    pub username: String,
    pub message: String,
    pub message_type: ChatMessageType,
    /// Unix timestamp in UTC (milliseconds)
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTypingMessage {
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStoppedTypingMessage {
    pub user_id: String,
}

/// A sequenced whiteboard action, used both for live updates and history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardActionInfo {
    pub room_id: String,
    pub action: WhiteboardActionKind,
    pub data: Value,
    pub user_id: String,
    pub username: String,
    pub version: u64,
    /// Unix timestamp in UTC (milliseconds)
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardHistoryMessage {
    pub actions: Vec<WhiteboardActionInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub message: String,
}
