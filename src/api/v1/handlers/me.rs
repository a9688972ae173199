/*
 * Responsibility
 * - GET /me
 * - access middleware が入れた AuthCtx をそのまま返す (下流 handler が主体を読む最小例)
 */
use axum::Json;

use crate::api::v1::{dto::me::MeResponse, extractors::AuthCtxExtractor};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse::from(ctx))
}
