//! `Authorization: <scheme> <token>` の分解
//!
//! - scheme は `Bearer` のみ (大文字小文字は区別しない)
//! - token が無い・空・余計な要素がある場合は malformed

use axum::http::HeaderValue;

use super::error::AuthError;

pub const BEARER_SCHEME: &str = "Bearer";

pub fn extract_token(value: &HeaderValue) -> Result<&str, AuthError> {
    let value = value
        .to_str()
        .map_err(|_| AuthError::invalid("authorization header is not visible ASCII"))?;

    let mut parts = value.split_whitespace();
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::MalformedCredential);
    };

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::MalformedCredential);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(raw: &'static str) -> Result<String, AuthError> {
        extract_token(&HeaderValue::from_static(raw)).map(str::to_owned)
    }

    #[test]
    fn splits_scheme_and_token() {
        assert_eq!(extract("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(extract("bearer   abc").unwrap(), "abc");
    }

    #[test]
    fn empty_token_after_scheme_is_malformed() {
        assert_eq!(extract("Bearer "), Err(AuthError::MalformedCredential));
        assert_eq!(extract("Bearer"), Err(AuthError::MalformedCredential));
        assert_eq!(extract(""), Err(AuthError::MalformedCredential));
    }

    #[test]
    fn other_schemes_and_extra_parts_are_malformed() {
        assert_eq!(extract("Basic dXNlcjpwYXNz"), Err(AuthError::MalformedCredential));
        assert_eq!(extract("Bearer a b"), Err(AuthError::MalformedCredential));
        assert_eq!(extract("abc.def.ghi"), Err(AuthError::MalformedCredential));
    }

    #[test]
    fn opaque_header_bytes_are_invalid_not_a_crash() {
        let value = HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap();
        let err = extract_token(&value).unwrap_err();
        assert_eq!(err.reason(), "invalid credential");
    }
}
