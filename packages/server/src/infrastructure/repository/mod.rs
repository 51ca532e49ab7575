//! Repository 実装
//!
//! - `inmemory`: プロセス内で完結する実装

pub mod inmemory;

pub use inmemory::{InMemoryChatStore, InMemoryRoomRegistry, InMemoryWhiteboardStore};
