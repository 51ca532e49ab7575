//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! - `RoomRegistry`: 「今このルームに誰がいるか」を保持するインメモリの台帳
//! - `WhiteboardStore`: ホワイトボード操作の永続化（外部ストア）
//! - `ChatStore`: チャットメッセージの永続化（外部ストア）

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{
    ActiveRoom, ChatMessage, ConnectionId, MediaKind, NewChatMessage, Participant, RegistryError,
    RoomId, StoreError, Timestamp, Version, WhiteboardAction,
};

/// `RoomRegistry::join` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// 登録されている参加者（再参加の場合は既存のもの）
    pub participant: Participant,
    /// 自分以外の参加者のスナップショット
    pub others: Vec<Participant>,
    /// 今回新しく追加されたか（false なら既に参加済み）
    pub newly_joined: bool,
}

/// `RoomRegistry::leave` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// 削除された参加者
    pub participant: Participant,
    /// 残っている参加者
    pub remaining: Vec<Participant>,
    /// 参加者が 0 人になりルームが削除されたか
    pub room_closed: bool,
}

/// Room Registry trait
///
/// 同じルームに対する join / leave / set_media / snapshot は互いに線形化される。
/// 参加者 0 人のルームは保持しない。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// ルームに参加する（ルームが無ければ作成）
    ///
    /// 既に参加済みの接続は重複登録しない。
    async fn join(&self, room_id: &RoomId, participant: Participant) -> JoinOutcome;

    /// ルームから退出する。参加していなければ `None`（エラーではない）
    async fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> Option<LeaveOutcome>;

    /// 参加者のメディアフラグを更新
    async fn set_media(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        kind: MediaKind,
        enabled: bool,
    ) -> Result<Participant, RegistryError>;

    /// ルームの参加者一覧（ルームが無ければ空）
    async fn snapshot(&self, room_id: &RoomId) -> Vec<Participant>;

    /// ルーム内の特定の参加者
    async fn find_participant(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Option<Participant>;

    /// 接続が参加しているルーム（通常 0 または 1 件）
    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomId>;

    /// アクティブなルームの一覧
    async fn list_rooms(&self) -> Vec<ActiveRoom>;
}

/// ホワイトボード操作の外部ストア
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WhiteboardStore: Send + Sync {
    /// 採番済みの操作を追記
    async fn append(&self, action: WhiteboardAction) -> Result<(), StoreError>;

    /// ルームの最大バージョン（操作が無ければ `Version::ZERO`）
    async fn find_max_version(&self, room_id: &RoomId) -> Result<Version, StoreError>;

    /// `from_version` より大きいバージョンの操作を昇順で取得
    async fn find_range(
        &self,
        room_id: &RoomId,
        from_version: Version,
    ) -> Result<Vec<WhiteboardAction>, StoreError>;
}

/// チャットメッセージの外部ストア
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// メッセージを保存し、ID を採番したものを返す
    async fn append(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError>;

    /// `before` より前の最新 `limit` 件を古い順で取得
    async fn find_recent(
        &self,
        room_id: &RoomId,
        limit: usize,
        before: Option<Timestamp>,
    ) -> Result<Vec<ChatMessage>, StoreError>;
}
