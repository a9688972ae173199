//! access token (JWT) 検証 → AuthCtx を extensions に入れる
//!
//! 流れ:
//! - `Authorization` ヘッダが無ければ missing credential
//! - `Bearer <token>` に分解できなければ malformed credential
//! - 署名 / exp / nbf の検証に失敗すれば invalid credential (理由はログにだけ出す)
//! - 成功したら AuthCtx を extensions に格納して次へ
//!
//! 検証が終わるまで extensions には一切書き込まない。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::AuthService;
use crate::state::AppState;

use super::bearer;
use super::context::RequestContext;
use super::error::AuthError;

/// 認証が必要な Router に access middleware を掛ける。
///
/// `route_layer` なので、存在しないパスは 401 ではなく 404 のまま。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_ctx = authenticate(&state.auth, &mut req)?;

    tracing::debug!(user_id = %auth_ctx.user_id, "request admitted");

    Ok(next.run(req).await)
}

/// Admit or reject one request. On success the returned `AuthCtx` is also stored
/// in `ctx`; on failure `ctx` is left untouched.
pub fn authenticate<C: RequestContext>(
    auth: &AuthService,
    ctx: &mut C,
) -> Result<AuthCtx, AuthError> {
    let result = admit(auth, ctx);

    if let Err(err) = &result {
        log_rejection(err);
    }

    result
}

fn admit<C: RequestContext>(auth: &AuthService, ctx: &mut C) -> Result<AuthCtx, AuthError> {
    let value = ctx
        .header(&header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?;

    let token = bearer::extract_token(value)?;
    let verified = auth.verify(token)?;

    let auth_ctx = AuthCtx::from(verified);

    // middleware → extractor への受け渡し
    ctx.set_attribute(auth_ctx.clone());

    Ok(auth_ctx)
}

fn log_rejection(err: &AuthError) {
    match err {
        AuthError::Configuration => {
            tracing::error!("bearer verification unavailable: signing secret is not configured")
        }
        AuthError::InvalidCredential { cause } => {
            tracing::warn!(cause = %cause, "access token verification failed")
        }
        other => tracing::warn!(reason = other.reason(), "authentication failed"),
    }
}
