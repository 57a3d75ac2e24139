//! Login page and form-based authentication handlers.
//!
//! The login page posts JSON to the auth proxy from `login.js`. These
//! handlers cover browsers without JavaScript: the same form posts here and
//! the exchange happens server-side, with the same cookie and error rules.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::{Credentials, LoginOutcome};
use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::{OptionalSession, removal_cookie, session_cookie};
use crate::state::AppState;

/// Sample email prefilled in the login form.
pub const SAMPLE_EMAIL: &str = "user@example.com";

/// Sample password prefilled in the login form.
pub const SAMPLE_PASSWORD: &str = "test1234";

/// Shown when the auth API gives no usable error message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Login credentials, as posted by the form or as JSON.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl From<LoginForm> for Credentials {
    fn from(form: LoginForm) -> Self {
        Self::new(form.email, form.password)
    }
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub signed_in: bool,
}

/// Pick the message to show for a rejected login.
///
/// Uses the API body's `error` string when there is a non-empty one.
#[must_use]
pub fn login_error_message(body: &serde_json::Value) -> String {
    body.get("error")
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(|| LOGIN_FAILED_MESSAGE.to_string(), str::to_owned)
}

/// Display the login page, prefilled with sample credentials.
pub async fn login_page(session: OptionalSession) -> LoginTemplate {
    LoginTemplate {
        email: SAMPLE_EMAIL.to_string(),
        password: SAMPLE_PASSWORD.to_string(),
        error: None,
        signed_in: session.is_signed_in(),
    }
}

/// Handle login form submission.
///
/// On success sets the session cookie and redirects home. On failure
/// re-renders the form with the submitted email and an error message.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: OptionalSession,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = form.email.clone();
    let credentials = Credentials::from(form);

    let error = match state.backend().login(&credentials).await {
        Ok(LoginOutcome::Authenticated(token)) => {
            add_breadcrumb("auth", "Login succeeded");
            let cookie = session_cookie(&state.config().session, &token);
            return ([(SET_COOKIE, cookie.to_string())], Redirect::to("/")).into_response();
        }
        Ok(LoginOutcome::Rejected { body, .. }) => login_error_message(&body),
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            LOGIN_FAILED_MESSAGE.to_string()
        }
    };

    LoginTemplate {
        email,
        password: String::new(),
        error: Some(error),
        signed_in: session.is_signed_in(),
    }
    .into_response()
}

/// Handle the header's Logout button: clear the session cookie and go home.
///
/// Purely local; the auth API is not contacted.
pub async fn logout(State(state): State<AppState>) -> Response {
    add_breadcrumb("auth", "Logged out");
    let cookie = removal_cookie(&state.config().session);
    ([(SET_COOKIE, cookie.to_string())], Redirect::to("/")).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            login_error_message(&json!({"error": "invalid credentials"})),
            "invalid credentials"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(login_error_message(&json!({})), "Login failed");
        assert_eq!(login_error_message(&json!({"error": ""})), "Login failed");
        assert_eq!(login_error_message(&json!({"error": 42})), "Login failed");
        assert_eq!(login_error_message(&json!({"message": "nope"})), "Login failed");
    }

    #[tokio::test]
    async fn test_login_page_is_prefilled() {
        let html = login_page(OptionalSession(None)).await.render().unwrap();

        assert!(html.contains(r#"value="user@example.com""#));
        assert!(html.contains(r#"value="test1234""#));
        assert!(html.contains(r#"id="login-error" role="alert" hidden"#));
        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains("/static/js/derived/login."));
    }

    #[test]
    fn test_login_page_shows_error() {
        let html = LoginTemplate {
            email: "someone@example.com".to_string(),
            password: String::new(),
            error: Some("invalid credentials".to_string()),
            signed_in: false,
        }
        .render()
        .unwrap();

        assert!(html.contains("invalid credentials"));
        assert!(!html.contains(r#"role="alert" hidden"#));
        assert!(html.contains(r#"value="someone@example.com""#));
    }
}
