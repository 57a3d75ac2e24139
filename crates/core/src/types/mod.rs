//! Core types for the Retail storefront.

pub mod id;
pub mod price;
pub mod product;

pub use id::ProductId;
pub use price::Price;
pub use product::{Product, ProductList};
