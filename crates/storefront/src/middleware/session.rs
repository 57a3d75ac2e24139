//! Session cookie store.
//!
//! The session is nothing more than the access token issued by the auth API,
//! kept in an HTTP-only cookie. There is no server-side session record: the
//! cookie is set on login, overwritten with an empty value on logout, and
//! otherwise only checked for presence.

use axum::http::{HeaderMap, header::COOKIE};
use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::{Cookie, SameSite};

use crate::backend::AccessToken;
use crate::config::SessionCookieConfig;

/// Session expiry in seconds (7 days).
pub const SESSION_MAX_AGE_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Build the cookie that stores `token` for the whole site.
#[must_use]
pub fn session_cookie(config: &SessionCookieConfig, token: &AccessToken) -> Cookie<'static> {
    base_cookie(config, token.expose().to_owned())
        .max_age(Duration::seconds(SESSION_MAX_AGE_SECONDS))
        .build()
}

/// Build the cookie that deletes the session (empty value, `Max-Age=0`).
#[must_use]
pub fn removal_cookie(config: &SessionCookieConfig) -> Cookie<'static> {
    base_cookie(config, String::new())
        .max_age(Duration::ZERO)
        .build()
}

fn base_cookie(
    config: &SessionCookieConfig,
    value: String,
) -> tower_sessions::cookie::CookieBuilder<'static> {
    Cookie::build((config.name.clone(), value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.secure)
}

/// Read the session token from the request's `Cookie` headers.
///
/// An empty value (as left behind by logout) counts as no session.
#[must_use]
pub fn read_session_token(headers: &HeaderMap, name: &str) -> Option<AccessToken> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name && !cookie.value().is_empty())
        .map(|cookie| AccessToken::new(cookie.value()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn config(secure: bool) -> SessionCookieConfig {
        SessionCookieConfig {
            name: "retail_token".to_string(),
            secure,
        }
    }

    fn headers(cookies: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(COOKIE, HeaderValue::from_static(*cookie));
        }
        headers
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(&config(false), &AccessToken::new("abc123"));

        assert_eq!(cookie.name(), "retail_token");
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(7)));
        assert_ne!(cookie.secure(), Some(true));

        let header = cookie.to_string();
        assert!(header.starts_with("retail_token=abc123"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Max-Age=604800"));
        assert!(!header.contains("Secure"));
    }

    #[test]
    fn test_session_cookie_secure_in_production() {
        let cookie = session_cookie(&config(true), &AccessToken::new("abc123"));
        assert_eq!(cookie.secure(), Some(true));
        assert!(cookie.to_string().contains("Secure"));
    }

    #[test]
    fn test_removal_cookie() {
        let cookie = removal_cookie(&config(false));

        assert_eq!(cookie.name(), "retail_token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.to_string().contains("Max-Age=0"));
    }

    #[test]
    fn test_read_session_token_among_other_cookies() {
        let headers = headers(&["theme=dark; retail_token=abc123; lang=en"]);
        let token = read_session_token(&headers, "retail_token").unwrap();
        assert_eq!(token.expose(), "abc123");
    }

    #[test]
    fn test_read_session_token_across_multiple_headers() {
        let headers = headers(&["theme=dark", "retail_token=xyz"]);
        let token = read_session_token(&headers, "retail_token").unwrap();
        assert_eq!(token.expose(), "xyz");
    }

    #[test]
    fn test_read_session_token_missing() {
        assert!(read_session_token(&HeaderMap::new(), "retail_token").is_none());
        assert!(read_session_token(&headers(&["other=1"]), "retail_token").is_none());
    }

    #[test]
    fn test_empty_session_cookie_is_no_session() {
        assert!(read_session_token(&headers(&["retail_token="]), "retail_token").is_none());
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        let headers = headers(&["retail_token_old=abc; RETAIL_TOKEN=def"]);
        assert!(read_session_token(&headers, "retail_token").is_none());
    }
}
