//! Retail storefront library.
//!
//! Server-rendered catalog and login pages backed by an external API, with
//! the session held in an HTTP-only cookie. Exposed as a library so the
//! router can be driven from tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;
