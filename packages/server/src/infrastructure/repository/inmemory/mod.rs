//! インメモリ実装

mod chat;
mod registry;
mod whiteboard;

pub use chat::InMemoryChatStore;
pub use registry::InMemoryRoomRegistry;
pub use whiteboard::InMemoryWhiteboardStore;
