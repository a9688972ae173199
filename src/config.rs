/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, APP_ENV, JWT_SECRET など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 署名シークレットの開発用フォールバックは production では無効
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::services::auth::{MAX_LEEWAY_SECONDS, SigningSecret};

/// Insecure fallback used outside production when `JWT_SECRET` is unset.
pub const DEVELOPMENT_JWT_SECRET: &str = "mytoken";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub jwt_secret: SigningSecret,
    pub jwt_algorithm: Algorithm,
    pub access_token_leeway_seconds: u64,

    pub request_timeout_seconds: u64,
    pub request_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (process env in `from_env`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) => SigningSecret::new(secret),
            None if app_env.is_production() => return Err(ConfigError::Missing("JWT_SECRET")),
            None => SigningSecret::new(DEVELOPMENT_JWT_SECRET),
        };

        let jwt_algorithm = match lookup("JWT_ALGORITHM") {
            Some(v) => parse_hmac_algorithm(&v).ok_or(ConfigError::Invalid("JWT_ALGORITHM"))?,
            None => Algorithm::HS256,
        };

        let access_token_leeway_seconds = match lookup("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs <= MAX_LEEWAY_SECONDS)
                .ok_or(ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let request_timeout_seconds = lookup("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(30);

        let request_body_limit_bytes = lookup("REQUEST_BODY_LIMIT_BYTES")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            jwt_secret,
            jwt_algorithm,
            access_token_leeway_seconds,
            request_timeout_seconds,
            request_body_limit_bytes,
        })
    }

    /// True when the signing secret is the built-in development fallback.
    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret.matches(DEVELOPMENT_JWT_SECRET)
    }
}

// Only shared-secret algorithms make sense for a single signing secret.
fn parse_hmac_algorithm(value: &str) -> Option<Algorithm> {
    match Algorithm::from_str(value.trim().to_ascii_uppercase().as_str()).ok()? {
        alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) => Some(alg),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_in_development() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.jwt_algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_leeway_seconds, 0);
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.request_body_limit_bytes, 1024 * 1024);
        assert!(config.uses_development_secret());
    }

    #[test]
    fn production_requires_explicit_secret() {
        let err = Config::from_lookup(lookup_from(&[("APP_ENV", "production")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn production_accepts_configured_secret() {
        let config = Config::from_lookup(lookup_from(&[
            ("APP_ENV", "PROD"),
            ("JWT_SECRET", "a-real-secret"),
        ]))
        .unwrap();

        assert!(config.app_env.is_production());
        assert!(!config.uses_development_secret());
        assert!(config.jwt_secret.matches("a-real-secret"));
    }

    #[test]
    fn empty_secret_is_kept_so_the_gate_fails_closed() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "")])).unwrap();
        assert!(config.jwt_secret.is_empty());
        assert!(!config.uses_development_secret());
    }

    #[test]
    fn blank_secret_is_treated_as_empty() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "   ")])).unwrap();
        assert!(config.jwt_secret.is_empty());
    }

    #[test]
    fn rejects_non_hmac_algorithm() {
        let err = Config::from_lookup(lookup_from(&[("JWT_ALGORITHM", "RS256")])).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("JWT_ALGORITHM"));

        let config = Config::from_lookup(lookup_from(&[("JWT_ALGORITHM", "hs512")])).unwrap();
        assert_eq!(config.jwt_algorithm, Algorithm::HS512);
    }

    #[test]
    fn leeway_must_parse_and_stay_bounded() {
        let config =
            Config::from_lookup(lookup_from(&[("ACCESS_TOKEN_LEEWAY_SECONDS", "60")])).unwrap();
        assert_eq!(config.access_token_leeway_seconds, 60);

        for bad in ["18446744073709551615", "301", "-5", "soon"] {
            let err = Config::from_lookup(lookup_from(&[("ACCESS_TOKEN_LEEWAY_SECONDS", bad)]))
                .unwrap_err();
            assert_eq!(err, ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"));
        }
    }

    #[test]
    fn rejects_unparseable_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PORT"));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "top-secret-value")])).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("top-secret-value"));
    }
}
