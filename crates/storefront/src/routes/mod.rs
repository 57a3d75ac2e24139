//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Catalog (product grid)
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (probes the backend)
//!
//! # Auth
//! GET  /login               - Login page
//! POST /login               - Login form submission (no-JS fallback)
//! POST /logout              - Logout button (clears cookie, redirects home)
//! POST /api/auth/login      - Auth proxy: login (JSON)
//! POST /api/auth/logout     - Auth proxy: logout (JSON)
//!
//! # Protected (route guard redirects to /login without a session cookie)
//! GET  /cart                - Cart page
//! GET  /admin               - Admin page
//!
//! # Assets
//! GET  /static/*            - CSS and JS
//! ```

pub mod api;
pub mod auth;
pub mod health;
pub mod home;
pub mod pages;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{request_id_middleware, route_guard, security_headers_middleware};
use crate::state::AppState;

/// Directory served under `/static`.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Create the auth proxy API routes router.
pub fn auth_api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(api::auth::login))
        .route("/logout", post(api::auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(home::catalog))
        // Health
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Login form
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Protected pages
        .route("/cart", get(pages::cart))
        .route("/admin", get(pages::admin))
        // Auth proxy
        .nest("/api/auth", auth_api_routes())
}

/// Build the complete application: routes, static assets, and middleware.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(pages::not_found)
        .layer(from_fn_with_state(state.clone(), route_guard))
        .layer(from_fn_with_state(state.clone(), security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
