//! Infrastructure 層
//!
//! - `auth`: JWT による本人確認
//! - `dto`: ワイヤー上の JSON 表現とドメインとの変換
//! - `message_pusher`: WebSocket への送信
//! - `repository`: Room Registry と外部ストアのインメモリ実装

pub mod auth;
pub mod dto;
pub mod message_pusher;
pub mod repository;
