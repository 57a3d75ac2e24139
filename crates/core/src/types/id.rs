//! Product identifiers.
//!
//! The catalog API is not consistent about identifier types: seeded products
//! carry string ids (`"p1"`), others carry numeric ids. Both are accepted and
//! kept as-is.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product, either numeric or textual.
///
/// # Example
///
/// ```
/// use retail_core::ProductId;
///
/// let numeric: ProductId = serde_json::from_str("42").unwrap();
/// let text: ProductId = serde_json::from_str("\"p1\"").unwrap();
///
/// assert_eq!(numeric.to_string(), "42");
/// assert_eq!(text.to_string(), "p1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric identifier (e.g. a database row id).
    Numeric(i64),
    /// Opaque textual identifier (e.g. an `ObjectId` or SKU-like key).
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}
