//! Protected placeholder pages and the 404 page.
//!
//! `/cart` and `/admin` sit behind the route guard; by the time these
//! handlers run a session cookie is present.

use askama::Template;
use askama_web::WebTemplate;
use axum::{http::StatusCode, response::IntoResponse};

use crate::filters;
use crate::middleware::OptionalSession;

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub signed_in: bool,
}

/// Admin page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub signed_in: bool,
}

/// Not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub signed_in: bool,
}

/// Display the cart page.
pub async fn cart(session: OptionalSession) -> CartTemplate {
    CartTemplate {
        signed_in: session.is_signed_in(),
    }
}

/// Display the admin page.
pub async fn admin(session: OptionalSession) -> AdminTemplate {
    AdminTemplate {
        signed_in: session.is_signed_in(),
    }
}

/// Fallback for unknown paths.
pub async fn not_found(session: OptionalSession) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            signed_in: session.is_signed_in(),
        },
    )
}
