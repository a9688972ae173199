pub mod access_jwt;
pub mod factory;
pub mod secret;

pub use access_jwt::{AccessJwtError, AuthService, MAX_LEEWAY_SECONDS, UserId, VerifiedAccessToken};
pub use factory::build_auth_service;
pub use secret::SigningSecret;

#[cfg(test)]
pub(crate) mod test_support {
    use jsonwebtoken::{Algorithm, EncodingKey, Header};

    pub fn now() -> u64 {
        chrono::Utc::now().timestamp() as u64
    }

    pub fn mint(claims: serde_json::Value, secret: &str) -> String {
        mint_with(claims, secret, Algorithm::HS256)
    }

    pub fn mint_with(claims: serde_json::Value, secret: &str, algorithm: Algorithm) -> String {
        jsonwebtoken::encode(
            &Header::new(algorithm),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }
}
