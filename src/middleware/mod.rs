/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: Bearer トークンの検証 (ヘッダ抽出 → 検証 → 拒否 / AuthCtx 格納)
 * - http: request-id / body limit / timeout / trace
 */
pub mod auth;
pub mod http;
