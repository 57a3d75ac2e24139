//! JSON API route handlers.

pub mod auth;

use serde::Serialize;

/// Acknowledgment body: `{"ok": true}`.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    #[must_use]
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}
