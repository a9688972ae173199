/*
 * Responsibility
 * - GET /me の response DTO
 * - 認証済み主体の情報だけを返す (token そのものは返さない)
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::v1::extractors::AuthCtx;
use crate::services::auth::UserId;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: UserId,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<AuthCtx> for MeResponse {
    fn from(ctx: AuthCtx) -> Self {
        Self {
            user_id: ctx.user_id,
            issued_at: ctx.issued_at,
            expires_at: ctx.expires_at,
        }
    }
}
