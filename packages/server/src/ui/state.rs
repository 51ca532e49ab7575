//! Server state and dependency wiring.

use std::sync::Arc;

use huddle_shared::time::Clock;

use crate::{
    domain::{ChatStore, IdentityVerifier, MessagePusher, WhiteboardSequencer, WhiteboardStore},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry},
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetChatHistoryUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, GetWhiteboardHistoryUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, NotifyTypingUseCase, RelaySignalUseCase, RoomGate, ScreenShareUseCase,
        SendChatMessageUseCase, SubmitWhiteboardActionUseCase, ToggleMediaUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// MessagePusher（メッセージ通知の抽象化）
    pub message_pusher: Arc<dyn MessagePusher>,
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    pub toggle_media_usecase: Arc<ToggleMediaUseCase>,
    pub screen_share_usecase: Arc<ScreenShareUseCase>,
    pub send_chat_message_usecase: Arc<SendChatMessageUseCase>,
    pub notify_typing_usecase: Arc<NotifyTypingUseCase>,
    pub submit_whiteboard_action_usecase: Arc<SubmitWhiteboardActionUseCase>,
    pub get_whiteboard_history_usecase: Arc<GetWhiteboardHistoryUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    pub get_chat_history_usecase: Arc<GetChatHistoryUseCase>,
}

impl AppState {
    /// Wire the in-process components around the given external adapters.
    ///
    /// The room registry and the message pusher live in this process; identity
    /// verification and both stores are supplied by the caller.
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        whiteboard_store: Arc<dyn WhiteboardStore>,
        chat_store: Arc<dyn ChatStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        // 1. Room Registry / MessagePusher / Sequencer
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());
        let sequencer = Arc::new(WhiteboardSequencer::new(whiteboard_store));
        let room_gate = Arc::new(RoomGate::new());

        // 2. UseCases
        let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
            registry.clone(),
            message_pusher.clone(),
            sequencer.clone(),
            room_gate.clone(),
        ));
        let join_room_usecase = Arc::new(JoinRoomUseCase::new(
            registry.clone(),
            message_pusher.clone(),
            leave_room_usecase.clone(),
            room_gate,
        ));
        let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
            verifier,
            message_pusher.clone(),
        ));
        let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
            registry.clone(),
            message_pusher.clone(),
            leave_room_usecase.clone(),
        ));
        let relay_signal_usecase = Arc::new(RelaySignalUseCase::new(
            registry.clone(),
            message_pusher.clone(),
        ));
        let toggle_media_usecase = Arc::new(ToggleMediaUseCase::new(
            registry.clone(),
            message_pusher.clone(),
        ));
        let screen_share_usecase = Arc::new(ScreenShareUseCase::new(
            registry.clone(),
            message_pusher.clone(),
        ));
        let send_chat_message_usecase = Arc::new(SendChatMessageUseCase::new(
            registry.clone(),
            chat_store.clone(),
            message_pusher.clone(),
            clock.clone(),
        ));
        let notify_typing_usecase = Arc::new(NotifyTypingUseCase::new(
            registry.clone(),
            message_pusher.clone(),
        ));
        let submit_whiteboard_action_usecase = Arc::new(SubmitWhiteboardActionUseCase::new(
            registry.clone(),
            sequencer.clone(),
            message_pusher.clone(),
            clock,
        ));
        let get_whiteboard_history_usecase = Arc::new(GetWhiteboardHistoryUseCase::new(
            registry.clone(),
            sequencer,
            message_pusher.clone(),
        ));
        let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));
        let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(registry));
        let get_chat_history_usecase = Arc::new(GetChatHistoryUseCase::new(chat_store));

        Self {
            message_pusher,
            connect_participant_usecase,
            disconnect_participant_usecase,
            join_room_usecase,
            leave_room_usecase,
            relay_signal_usecase,
            toggle_media_usecase,
            screen_share_usecase,
            send_chat_message_usecase,
            notify_typing_usecase,
            submit_whiteboard_action_usecase,
            get_whiteboard_history_usecase,
            get_rooms_usecase,
            get_room_detail_usecase,
            get_chat_history_usecase,
        }
    }
}
