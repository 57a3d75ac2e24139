//! Route guard and session extractors.
//!
//! The guard only checks that a session cookie is present. It does not look
//! inside the token, so `/admin` is gated on "logged in", not on any role.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::session::read_session_token;
use crate::backend::AccessToken;
use crate::state::AppState;

/// Path prefixes that require a session cookie.
pub const PROTECTED_PREFIXES: &[&str] = &["/cart", "/admin"];

/// Where unauthenticated requests to protected paths are sent.
pub const LOGIN_PATH: &str = "/login";

/// Whether `path` falls under one of the [`PROTECTED_PREFIXES`].
///
/// Plain string prefix match: `/cart`, `/cart/items` and `/cartography` are
/// all protected.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Where to send a visitor who lacks a session: [`LOGIN_PATH`], keeping the
/// original query string.
#[must_use]
pub fn login_redirect_target(query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{LOGIN_PATH}?{query}"),
        _ => LOGIN_PATH.to_string(),
    }
}

/// Middleware that redirects to [`LOGIN_PATH`] when a protected path is
/// requested without a session cookie. The query string is carried over.
///
/// Every other request passes through untouched.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/cart", get(cart))
///     .layer(axum::middleware::from_fn_with_state(state.clone(), route_guard));
/// ```
pub async fn route_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if is_protected(path)
        && read_session_token(request.headers(), &state.config().session.name).is_none()
    {
        tracing::debug!(%path, "No session cookie, redirecting to login");
        return Redirect::temporary(&login_redirect_target(request.uri().query())).into_response();
    }

    next.run(request).await
}

/// Extractor that optionally gets the session token.
///
/// Never rejects; used by pages that render differently for signed-in
/// shoppers (e.g. the header's Login/Logout link).
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalSession(session): OptionalSession) -> impl IntoResponse {
///     if session.is_some() { "Welcome back" } else { "Hello, guest" }
/// }
/// ```
pub struct OptionalSession(pub Option<AccessToken>);

impl OptionalSession {
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(read_session_token(
            &parts.headers,
            &state.config().session.name,
        )))
    }
}
