use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};

use crate::services::auth::SigningSecret;

/// Upper bound for clock-skew tolerance on `exp`/`nbf`/`iat`.
pub const MAX_LEEWAY_SECONDS: u64 = 300;

// Errors returned by access-token verification + subject resolution.
#[derive(Debug)]
pub enum AccessJwtError {
    SecretUnavailable,
    Jwt(jsonwebtoken::errors::Error),
    MissingSubject,
    EmptyClaim(&'static str),
    Expired,
    IssuedInFuture,
}

impl AccessJwtError {
    /// The verifier itself is unusable, as opposed to the token being bad.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::SecretUnavailable)
    }
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecretUnavailable => write!(f, "signing secret is empty"),
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::MissingSubject => write!(f, "neither 'id' nor 'sub' claim present"),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
            Self::Expired => write!(f, "token expired"),
            Self::IssuedInFuture => write!(f, "'iat' claim is in the future"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// Subject of a verified token. Blog tokens carry a numeric id, others a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Access token (JWT) claims.
///
/// NOTE:
/// - `id` is what the blog signup/signin flow puts in the payload; `sub` is the
///   registered claim. `id` wins when both are present.
/// - `exp`/`iat`/`nbf` are optional and only checked when present.
/// - `exp == now` counts as expired; `iat` may not be ahead of now + leeway.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub sub: Option<String>,

    #[serde(default)]
    pub exp: Option<u64>,
    #[serde(default)]
    pub iat: Option<u64>,
}

impl AccessTokenClaims {
    fn subject(&self) -> Result<UserId, AccessJwtError> {
        match (&self.id, &self.sub) {
            (Some(UserId::Text(s)), _) if s.trim().is_empty() => Err(AccessJwtError::EmptyClaim("id")),
            (Some(id), _) => Ok(id.clone()),
            (None, Some(sub)) if sub.trim().is_empty() => Err(AccessJwtError::EmptyClaim("sub")),
            (None, Some(sub)) => Ok(UserId::Text(sub.clone())),
            (None, None) => Err(AccessJwtError::MissingSubject),
        }
    }
}

/// AuthService が返す「検証済み・アプリ側で使う型」
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub user_id: UserId,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// HMAC access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
/// - Holds no mutable state; one instance is shared by every request.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("has_key", &self.decoding_key.is_some())
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &SigningSecret, algorithm: Algorithm, leeway_seconds: u64) -> Self {
        // Empty secret: keep no key at all so that verification fails closed.
        let decoding_key = (!secret.is_empty()).then(|| DecodingKey::from_secret(secret.as_bytes()));

        let mut validation = Validation::new(algorithm);
        // `{ "id": 42 }` without exp is a valid blog token; only check exp/nbf when present.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = leeway_seconds.min(MAX_LEEWAY_SECONDS);

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn has_usable_secret(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// Verify signature (+ exp/nbf if present) and resolve the subject.
    ///
    /// This is the entry-point for the access middleware.
    pub fn verify(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let key = self
            .decoding_key
            .as_ref()
            .ok_or(AccessJwtError::SecretUnavailable)?;

        let data = jsonwebtoken::decode::<AccessTokenClaims>(token, key, &self.validation)?;
        let claims = data.claims;
        self.check_times(&claims)?;
        let user_id = claims.subject()?;

        Ok(VerifiedAccessToken {
            user_id,
            issued_at: claims.iat.and_then(to_datetime),
            expires_at: claims.exp.and_then(to_datetime),
        })
    }

    // jsonwebtoken accepts `exp == now` and never looks at `iat`.
    fn check_times(&self, claims: &AccessTokenClaims) -> Result<(), AccessJwtError> {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        let leeway = self.validation.leeway;

        if let Some(exp) = claims.exp
            && exp.saturating_add(leeway) <= now
        {
            return Err(AccessJwtError::Expired);
        }
        if let Some(iat) = claims.iat
            && iat > now.saturating_add(leeway)
        {
            return Err(AccessJwtError::IssuedInFuture);
        }

        Ok(())
    }
}

fn to_datetime(secs: u64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(i64::try_from(secs).ok()?, 0)
}
