//! Type-safe price representation using decimal arithmetic.
//!
//! Prices arrive from the catalog API as JSON numbers (`19.99`) or, for some
//! backends, as decimal strings (`"19.99"`). Both parse into the same
//! [`Price`]. Parsing goes through `rust_decimal`, so `19.99` stays `19.99`
//! rather than picking up binary floating-point noise.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fractional digits shown to shoppers.
const DISPLAY_SCALE: u32 = 2;

/// A product price in the store's display currency (US dollars).
///
/// `Display` renders the shopper-facing form: a dollar sign followed by
/// exactly two decimals, rounding half away from zero on the exact decimal
/// value. `1.005` therefore shows as `$1.01`, not the `$1.00` a binary float
/// would round to.
///
/// ```
/// use retail_core::Price;
///
/// let price: Price = serde_json::from_str("19.99").unwrap();
/// assert_eq!(price.to_string(), "$19.99");
///
/// let whole: Price = serde_json::from_str("49").unwrap();
/// assert_eq!(whole.to_string(), "$49.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the raw amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "${rounded:.2}")
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Price {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(parse("19.99").to_string(), "$19.99");
        assert_eq!(parse("29.9").to_string(), "$29.90");
        assert_eq!(parse("49.00").to_string(), "$49.00");
    }

    #[test]
    fn test_display_integer_price() {
        assert_eq!(parse("5").to_string(), "$5.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(parse("\"2.345\"").to_string(), "$2.35");
        assert_eq!(parse("\"2.344\"").to_string(), "$2.34");
        assert_eq!(parse("\"1.005\"").to_string(), "$1.01");
    }

    #[test]
    fn test_accepts_decimal_string() {
        assert_eq!(parse("\"19.99\""), parse("19.99"));
    }

    #[test]
    fn test_rejects_non_numeric_string() {
        assert!(serde_json::from_str::<Price>("\"cheap\"").is_err());
    }

    #[test]
    fn test_amount_roundtrips_constructor() {
        let amount = Decimal::new(1999, 2);
        assert_eq!(Price::new(amount).amount(), amount);
    }
}
