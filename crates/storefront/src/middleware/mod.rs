//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (record on span, echo in response)
//! 4. Security headers
//! 5. Route guard (redirect protected paths without a session cookie)

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    LOGIN_PATH, OptionalSession, PROTECTED_PREFIXES, is_protected, login_redirect_target, route_guard,
};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::{read_session_token, removal_cookie, session_cookie};
