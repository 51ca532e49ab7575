//! UseCase 層
//!
//! 受信イベントごとに 1 つのユースケースを持つ。ユースケースは Domain 層の
//! trait（RoomRegistry, 外部ストア, MessagePusher）にのみ依存する。

mod connect_participant;
mod disconnect_participant;
mod error;
mod get_chat_history;
mod get_rooms;
mod get_whiteboard_history;
mod join_room;
mod leave_room;
mod membership;
mod notify;
mod notify_typing;
mod relay_signal;
mod room_gate;
mod screen_share;
mod send_chat_message;
mod submit_whiteboard_action;
mod toggle_media;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{GetRoomDetailError, SignalingError};
pub use get_chat_history::{DEFAULT_CHAT_HISTORY_LIMIT, GetChatHistoryUseCase, MAX_CHAT_HISTORY_LIMIT};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase};
pub use get_whiteboard_history::GetWhiteboardHistoryUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use notify_typing::NotifyTypingUseCase;
pub use relay_signal::{RelayOutcome, RelaySignalUseCase, SignalPayload};
pub use room_gate::RoomGate;
pub use screen_share::ScreenShareUseCase;
pub use send_chat_message::SendChatMessageUseCase;
pub use submit_whiteboard_action::SubmitWhiteboardActionUseCase;
pub use toggle_media::ToggleMediaUseCase;
