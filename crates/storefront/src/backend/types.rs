//! Wire types exchanged with the external API.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Login credentials collected by the login form.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// JSON body for `POST /auth/login`.
    pub(super) fn payload(&self) -> LoginPayload<'_> {
        LoginPayload {
            email: &self.email,
            password: self.password.expose_secret(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub(super) struct LoginPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Success body of `POST /auth/login`. Other fields are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Opaque bearer token issued by the auth API.
///
/// Never decoded or validated locally.
#[derive(Debug, Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The raw token, for writing into the session cookie.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Result of a login round trip that reached the auth API.
#[derive(Debug)]
pub enum LoginOutcome {
    /// The API accepted the credentials and issued a token.
    Authenticated(AccessToken),
    /// The API answered with a non-success status.
    ///
    /// `body` is the API's JSON body, or an empty object when the body was
    /// not JSON.
    Rejected {
        status: reqwest::StatusCode,
        body: serde_json::Value,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("user@example.com", "test1234");
        let debug_output = format!("{credentials:?}");

        assert!(debug_output.contains("user@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("test1234"));
    }

    #[test]
    fn test_payload_forwards_credentials_unchanged() {
        let credentials = Credentials::new("user@example.com", "  spaced pass ");
        let json = serde_json::to_value(credentials.payload()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"email": "user@example.com", "password": "  spaced pass "})
        );
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("abc123");
        assert_eq!(token.expose(), "abc123");
        assert!(!format!("{token:?}").contains("abc123"));
    }

    #[test]
    fn test_login_response_without_token() {
        let body: LoginResponse = serde_json::from_str(r#"{"user":{"id":1}}"#).unwrap();
        assert!(body.access_token.is_none());
    }
}
