//! Security headers middleware.
//!
//! Adds restrictive headers to every response. Page responses are also marked
//! uncacheable, since the catalog is fetched fresh on every render and pages
//! vary with the session cookie; `/static` assets keep their default caching.

use axum::{
    extract::{Request, State},
    http::{
        HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};
use url::Url;

use crate::state::AppState;

/// Content Security Policy for all pages.
///
/// Product images come from whatever host the catalog API points at, so
/// `img-src` allows the API's own origin (plain http in development) and any
/// https origin. Scripts and styles are same-origin only.
#[must_use]
pub fn content_security_policy(api_base: &Url) -> String {
    let api_origin = api_base.origin().ascii_serialization();

    format!(
        "default-src 'none'; \
         script-src 'self'; \
         style-src 'self'; \
         img-src 'self' {api_origin} https: data:; \
         connect-src 'self'; \
         base-uri 'self'; \
         form-action 'self'; \
         frame-ancestors 'none'"
    )
}

/// Add security headers to all responses.
///
/// - `X-Frame-Options: DENY`
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: strict-origin-when-cross-origin`
/// - `Content-Security-Policy` (see [`content_security_policy`])
/// - `Cache-Control: no-store` for everything outside `/static`
pub async fn security_headers_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let is_static = request.uri().path().starts_with("/static/");
    let csp = content_security_policy(&state.config().backend.base_url);

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(
        REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    match HeaderValue::from_str(&csp) {
        Ok(value) => {
            headers.insert(CONTENT_SECURITY_POLICY, value);
        }
        Err(e) => tracing::error!("Invalid Content-Security-Policy header: {}", e),
    }

    if !is_static {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    response
}
