//! Catalog products as served by the external API.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A catalog product.
///
/// Owned by the external catalog API; the storefront only reads and displays
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Ordered image URLs; the first one is the primary image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Product {
    /// The image shown on product cards, if the product has any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .as_deref()
            .and_then(<[String]>::first)
            .map(String::as_str)
    }
}

/// One page of products from `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductList {
    pub items: Vec<Product>,
    /// Total number of products known to the API, when it reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}
