/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - access middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - リクエストごとに作られ、リクエスト終了とともに破棄される (永続化しない)
 */

use chrono::{DateTime, Utc};

use crate::services::auth::{UserId, VerifiedAccessToken};

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は token の `id` (無ければ `sub`)
/// - `issued_at` / `expires_at` は token に `iat` / `exp` があった場合のみ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: UserId,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<VerifiedAccessToken> for AuthCtx {
    fn from(token: VerifiedAccessToken) -> Self {
        Self {
            user_id: token.user_id,
            issued_at: token.issued_at,
            expires_at: token.expires_at,
        }
    }
}
