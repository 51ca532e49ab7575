//! 接続時の本人確認

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{AuthError, Identity};

/// 外部の認証サービスが発行したトークンを検証する
///
/// 接続ごとに 1 回だけ、WebSocket の受け入れ前に呼ばれる。失敗した接続は
/// Room Registry に到達しない。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}
