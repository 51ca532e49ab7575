//! 本人確認の実装
//!
//! - `jwt`: 共有シークレットで署名された HS256 JWT の検証

pub mod jwt;

pub use jwt::{IdentityClaims, JwtIdentityVerifier};
