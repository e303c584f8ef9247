//! Session key transport: a cookie for browsers, a bearer token for API clients.

use axum::http::{header, HeaderMap};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "planner_session";

/// Session key from `Authorization: Bearer` or the session cookie.
pub fn session_key(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_value(headers, SESSION_COOKIE))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value storing `key`.
pub fn set_session(key: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, key)
}

/// `Set-Cookie` value removing the session cookie.
pub fn clear_session() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; planner_session=abc123; lang=en"),
        );
        assert_eq!(session_key(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_bearer_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("planner_session=abc"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok-9"));
        assert_eq!(session_key(&headers).as_deref(), Some("tok-9"));
    }

    #[test]
    fn test_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert!(session_key(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("planner_session="));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert!(session_key(&headers).is_none());
    }

    #[test]
    fn test_set_and_clear() {
        assert_eq!(
            set_session("abc"),
            "planner_session=abc; Path=/; HttpOnly; SameSite=Lax"
        );
        assert!(clear_session().contains("Max-Age=0"));
    }
}
