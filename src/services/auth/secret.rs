use std::fmt;

/// Shared HMAC secret used to verify access tokens.
///
/// - Debug never prints the value.
/// - An empty secret is representable on purpose: the verifier refuses to use it
///   and rejects every token instead of failing at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(String);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Blank (whitespace-only) counts as empty.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("SigningSecret(<empty>)")
        } else {
            f.write_str("SigningSecret([REDACTED])")
        }
    }
}
