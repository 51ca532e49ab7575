//! Request handlers.

mod auth;
mod http;
mod signaling;
mod websocket;

pub use http::{
    get_chat_history, get_room_detail, get_rooms, get_whiteboard_history, health_check,
};
pub use websocket::websocket_handler;
