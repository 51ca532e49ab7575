//! Inbound WebSocket event dispatch.
//!
//! Each text frame is parsed into a [`ClientEvent`] and routed to its use case.
//! Validation and persistence failures are reported back to the sender as an
//! `error` event; the connection stays open.

use crate::{
    domain::{Connection, ConnectionId, MessageBody, MessagePusher, RoomId, Version},
    infrastructure::dto::websocket::{ClientEvent, ErrorMessage, ServerEvent},
    ui::state::AppState,
    usecase::{SignalPayload, SignalingError},
};

pub(super) async fn dispatch(state: &AppState, connection: &mut Connection, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("Malformed message from {}: {}", connection.id, e);
            reply_error(state, connection, format!("invalid message: {}", e)).await;
            return;
        }
    };

    if let Err(e) = handle_event(state, connection, event).await {
        tracing::debug!("Rejected event from {}: {}", connection.id, e);
        reply_error(state, connection, e.to_string()).await;
    }
}

async fn handle_event(
    state: &AppState,
    connection: &mut Connection,
    event: ClientEvent,
) -> Result<(), SignalingError> {
    match event {
        ClientEvent::JoinRoom(request) => {
            let room_id = RoomId::new(request.room_id)?;
            state.join_room_usecase.execute(connection, room_id).await;
        }
        ClientEvent::LeaveRoom(request) => {
            let room_id = RoomId::new(request.room_id)?;
            state.leave_room_usecase.execute(connection, &room_id).await;
        }
        ClientEvent::Offer(request) => {
            relay(state, connection, &request.to, SignalPayload::Offer(request.offer)).await?;
        }
        ClientEvent::Answer(request) => {
            relay(state, connection, &request.to, SignalPayload::Answer(request.answer)).await?;
        }
        ClientEvent::IceCandidate(request) => {
            let payload = SignalPayload::IceCandidate(request.candidate);
            relay(state, connection, &request.to, payload).await?;
        }
        ClientEvent::ToggleMedia(request) => {
            let room_id = RoomId::new(request.room_id)?;
            state
                .toggle_media_usecase
                .execute(connection, &room_id, request.kind, request.enabled)
                .await;
        }
        ClientEvent::StartScreenShare(request) => {
            let room_id = RoomId::new(request.room_id)?;
            state.screen_share_usecase.start(connection, &room_id).await?;
        }
        ClientEvent::StopScreenShare(request) => {
            let room_id = RoomId::new(request.room_id)?;
            state.screen_share_usecase.stop(connection, &room_id).await?;
        }
        ClientEvent::ChatMessage(request) => {
            let room_id = RoomId::new(request.room_id)?;
            let message = MessageBody::new(request.message)?;
            state
                .send_chat_message_usecase
                .execute(
                    connection,
                    room_id,
                    message,
                    request.message_type,
                    request.reply_to,
                )
                .await?;
        }
        ClientEvent::TypingStart(request) => {
            let room_id = RoomId::new(request.room_id)?;
            state.notify_typing_usecase.start(connection, &room_id).await?;
        }
        ClientEvent::TypingStop(request) => {
            let room_id = RoomId::new(request.room_id)?;
            state.notify_typing_usecase.stop(connection, &room_id).await?;
        }
        ClientEvent::WhiteboardDraw(request) => {
            let room_id = RoomId::new(request.room_id)?;
            state
                .submit_whiteboard_action_usecase
                .execute(connection, &room_id, request.action, request.data)
                .await?;
        }
        ClientEvent::WhiteboardGetHistory(request) => {
            let room_id = RoomId::new(request.room_id)?;
            let from_version = Version::from_lower_bound(request.from_version);
            state
                .get_whiteboard_history_usecase
                .execute(connection, &room_id, from_version)
                .await?;
        }
    }
    Ok(())
}

async fn relay(
    state: &AppState,
    connection: &Connection,
    to: &str,
    payload: SignalPayload,
) -> Result<(), SignalingError> {
    let to = to.parse::<ConnectionId>()?;
    state
        .relay_signal_usecase
        .execute(connection, to, payload)
        .await?;
    Ok(())
}

async fn reply_error(state: &AppState, connection: &Connection, message: String) {
    let event = ServerEvent::Error(ErrorMessage { message });
    let json = match event.to_json() {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize error event: {}", e);
            return;
        }
    };
    if let Err(e) = state.message_pusher.push_to(&connection.id, &json).await {
        tracing::warn!("Failed to send error to {}: {}", connection.id, e);
    }
}
