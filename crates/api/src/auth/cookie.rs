//! The `session_token` cookie.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::{HeaderMap, HeaderValue};

use crate::error::AppError;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// `Set-Cookie` value that stores `token` for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> Result<HeaderValue, AppError> {
    build(token, max_age_secs, secure)
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> Result<HeaderValue, AppError> {
    build("", 0, secure)
}

fn build(value: &str, max_age_secs: i64, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{SESSION_COOKIE}={value}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {e}")))
}

/// Extract the session token from a request.
///
/// An `Authorization: Bearer` header wins over the cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_header_is_read() {
        let map = headers(&[("authorization", "Bearer abc.def.ghi")]);
        assert_eq!(session_token(&map).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn cookie_is_read_among_others() {
        let map = headers(&[("cookie", "theme=dark; session_token=tok123; lang=en")]);
        assert_eq!(session_token(&map).as_deref(), Some("tok123"));
    }

    #[test]
    fn bearer_wins_over_cookie() {
        let map = headers(&[
            ("cookie", "session_token=from-cookie"),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(session_token(&map).as_deref(), Some("from-header"));
    }

    #[test]
    fn non_bearer_scheme_falls_back_to_cookie() {
        let map = headers(&[
            ("authorization", "Basic dXNlcjpwYXNz"),
            ("cookie", "session_token=from-cookie"),
        ]);
        assert_eq!(session_token(&map).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn empty_values_are_absent() {
        assert!(session_token(&headers(&[("cookie", "session_token=")])).is_none());
        assert!(session_token(&headers(&[("authorization", "Bearer ")])).is_none());
        assert!(session_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn cookie_attributes() {
        let value = session_cookie("tok", 86_400, false).unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "session_token=tok; HttpOnly; SameSite=Strict; Path=/; Max-Age=86400"
        );

        let secure = session_cookie("tok", 60, true).unwrap();
        assert!(secure.to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn clearing_expires_immediately() {
        let value = clear_session_cookie(false).unwrap();
        assert!(value.to_str().unwrap().starts_with("session_token=; "));
        assert!(value.to_str().unwrap().contains("Max-Age=0"));
    }
}
