//! Auth proxy endpoints.
//!
//! ```text
//! POST /api/auth/login   - forward credentials to the auth API, set cookie
//! POST /api/auth/logout  - clear the session cookie (local only)
//! ```

use axum::{
    Json,
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use super::Ack;
use crate::backend::{Credentials, LoginOutcome};
use crate::error::{Result, add_breadcrumb};
use crate::middleware::{removal_cookie, session_cookie};
use crate::routes::auth::LoginForm;
use crate::state::AppState;

/// Forward credentials to the auth API.
///
/// - Success: sets the session cookie and returns `{"ok": true}`.
/// - Rejection: returns the API's status and JSON body verbatim (`{}` when
///   the body was not JSON); the cookie is left alone.
///
/// # Errors
///
/// Returns 502 if the auth API cannot be reached or its success response
/// carries no access token.
#[instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(form): Json<LoginForm>) -> Result<Response> {
    let credentials = Credentials::from(form);

    let response = match state.backend().login(&credentials).await? {
        LoginOutcome::Authenticated(token) => {
            add_breadcrumb("auth", "Login succeeded");
            let cookie = session_cookie(&state.config().session, &token);
            ([(SET_COOKIE, cookie.to_string())], Json(Ack::ok())).into_response()
        }
        LoginOutcome::Rejected { status, body } => (status, Json(body)).into_response(),
    };

    Ok(response)
}

/// Clear the session cookie. Always succeeds.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    add_breadcrumb("auth", "Logged out");
    let cookie = removal_cookie(&state.config().session);
    ([(SET_COOKIE, cookie.to_string())], Json(Ack::ok()))
}
