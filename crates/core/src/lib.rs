//! Retail Core - Shared catalog types.
//!
//! This crate provides the types the storefront reads from the external
//! catalog API:
//! - [`Product`] - a single catalog entry
//! - [`ProductList`] - one page of products as returned by `GET /products`
//! - [`ProductId`] and [`Price`] - the scalar pieces of a product
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Products are
//! owned by the external API; this crate only describes their shape.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
