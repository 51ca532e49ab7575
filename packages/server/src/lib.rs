//! Session-coordination server for Huddle.
//!
//! Rooms, WebRTC signaling relay, a versioned whiteboard and chat broadcast
//! over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
