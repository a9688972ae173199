/*
 * Responsibility
 * - GET /health (疎通用)
 * - access middleware を通さない (token 無しで 200)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
