//! Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthService;

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    let auth = AuthService::new(
        &config.jwt_secret,
        config.jwt_algorithm,
        config.access_token_leeway_seconds,
    );

    if !auth.has_usable_secret() {
        tracing::error!("JWT_SECRET is empty; every bearer token will be rejected");
    } else if config.uses_development_secret() {
        tracing::warn!("JWT_SECRET not set; using the insecure development fallback secret");
    }

    Arc::new(auth)
}
