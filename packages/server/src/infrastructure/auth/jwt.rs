//! JWT による本人確認
//!
//! 外部の認証サービスが共有シークレットで署名した HS256 トークンを検証し、
//! クレームから `Identity` を取り出す。トークンの発行はこのサーバーの責務ではない。

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthError, Identity, IdentityVerifier, UserId, Username};

/// トークンのクレーム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityClaims {
    pub user_id: String,
    pub username: String,
    /// 有効期限（Unix 秒）
    pub exp: u64,
}

/// HS256 JWT を検証する IdentityVerifier 実装
pub struct JwtIdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Rejected identity token: {}", e);
                AuthError::AuthenticationFailed(e.to_string())
            })?;

        let claims = data.claims;
        let user_id = UserId::new(claims.user_id)
            .map_err(|e| AuthError::AuthenticationFailed(e.to_string()))?;
        let username = Username::new(claims.username)
            .map_err(|e| AuthError::AuthenticationFailed(e.to_string()))?;

        Ok(Identity::new(user_id, username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode, get_current_timestamp};

    const SECRET: &[u8] = b"test-secret";

    fn token(secret: &[u8], user_id: &str, username: &str, exp: u64) -> String {
        let claims = IdentityClaims {
            user_id: user_id.to_string(),
            username: username.to_string(),
            exp,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    #[tokio::test]
    async fn test_verify_valid_token() {
        // テスト項目: 正しく署名された有効期限内のトークンは Identity を返す
        // given (前提条件):
        let verifier = JwtIdentityVerifier::new(SECRET);
        let token = token(SECRET, "u1", "alice", get_current_timestamp() + 3600);

        // when (操作):
        let identity = verifier.verify(&token).await.unwrap();

        // then (期待する結果):
        assert_eq!(identity.user_id.as_str(), "u1");
        assert_eq!(identity.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_signature() {
        // テスト項目: 別のシークレットで署名されたトークンは拒否される
        // given (前提条件):
        let verifier = JwtIdentityVerifier::new(SECRET);
        let token = token(b"other-secret", "u1", "alice", get_current_timestamp() + 3600);

        // when (操作):
        let result = verifier.verify(&token).await;

        // then (期待する結果):
        assert!(matches!(result, Err(AuthError::AuthenticationFailed(_))));
    }

    #[tokio::test]
    async fn test_verify_rejects_expired_token() {
        // テスト項目: 有効期限切れのトークンは拒否される
        // given (前提条件):
        let verifier = JwtIdentityVerifier::new(SECRET);
        let token = token(SECRET, "u1", "alice", get_current_timestamp() - 3600);

        // when (操作):
        let result = verifier.verify(&token).await;

        // then (期待する結果):
        assert!(matches!(result, Err(AuthError::AuthenticationFailed(_))));
    }

    #[tokio::test]
    async fn test_verify_rejects_empty_username() {
        // テスト項目: ユーザー名が空のトークンは拒否される
        // given (前提条件):
        let verifier = JwtIdentityVerifier::new(SECRET);
        let token = token(SECRET, "u1", " ", get_current_timestamp() + 3600);

        // when (操作):
        let result = verifier.verify(&token).await;

        // then (期待する結果):
        assert!(matches!(result, Err(AuthError::AuthenticationFailed(_))));
    }

    #[tokio::test]
    async fn test_verify_rejects_garbage() {
        // テスト項目: JWT として解釈できない文字列は拒否される
        // given (前提条件):
        let verifier = JwtIdentityVerifier::new(SECRET);

        // when (操作):
        let result = verifier.verify("not-a-jwt").await;

        // then (期待する結果):
        assert!(matches!(result, Err(AuthError::AuthenticationFailed(_))));
    }
}
