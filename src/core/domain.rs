//! Domain primitives: quotes and fixed-point rendering.

use rust_decimal::{Decimal, RoundingStrategy};
use std::time::{Duration, Instant};

/// Number of fractional digits in a rendered asset quantity.
///
/// Matches the reference asset's smallest representable unit (1 wei =
/// 10^-18 ETH), so downstream consumers can treat the string as an exact
/// wei-granularity amount.
pub const QUANTITY_SCALE: u32 = 18;

/// A fetched USD price paired with the moment it was obtained.
///
/// The pair is swapped atomically in the oracle's cache, so a reader never
/// observes a timestamp newer than its price or vice versa.
#[derive(Debug, Clone, Copy)]
pub struct Quote {
    /// USD price per unit of the reference asset. Always positive.
    pub price: Decimal,
    /// When the price was fetched.
    pub fetched_at: Instant,
}

impl Quote {
    #[must_use]
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            fetched_at: Instant::now(),
        }
    }

    /// True while the quote's age is strictly below `ttl`.
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Render a quantity of the reference asset with exactly 18 fractional
/// digits, regardless of magnitude.
///
/// Rounds midpoint-away-from-zero at the 18th digit, then pads the
/// fraction with trailing zeros. Padding happens on the rendered string
/// rather than via `Decimal::rescale`, which silently caps the scale when
/// a large quotient's mantissa cannot hold all 18 fractional digits.
#[must_use]
pub fn format_asset_quantity(value: Decimal) -> String {
    let quantity =
        value.round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let mut rendered = quantity.to_string();

    let frac_digits = match rendered.find('.') {
        Some(dot) => rendered.len() - dot - 1,
        None => {
            rendered.push('.');
            0
        }
    };
    for _ in frac_digits..QUANTITY_SCALE as usize {
        rendered.push('0');
    }

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_renders_all_fractional_digits() {
        assert_eq!(format_asset_quantity(dec!(0)), "0.000000000000000000");
    }

    #[test]
    fn short_values_are_zero_padded() {
        assert_eq!(format_asset_quantity(dec!(0.05)), "0.050000000000000000");
        assert_eq!(format_asset_quantity(dec!(2)), "2.000000000000000000");
    }

    #[test]
    fn long_values_round_at_the_18th_digit() {
        // 1/3 to Decimal's full precision, rounded to 18 places.
        let third = dec!(1) / dec!(3);
        assert_eq!(format_asset_quantity(third), "0.333333333333333333");

        let two_thirds = dec!(2) / dec!(3);
        assert_eq!(format_asset_quantity(two_thirds), "0.666666666666666667");
    }

    #[test]
    fn large_magnitudes_keep_all_18_fractional_digits() {
        // Above ~7.9e10 the mantissa cannot carry a full 18-digit scale,
        // so the padding must come from the formatter itself.
        assert_eq!(
            format_asset_quantity(dec!(100000000000)),
            "100000000000.000000000000000000"
        );
        assert_eq!(
            format_asset_quantity(dec!(79228162514264.3375)),
            "79228162514264.337500000000000000"
        );
    }

    #[test]
    fn negative_values_pass_through() {
        assert_eq!(format_asset_quantity(dec!(-0.5)), "-0.500000000000000000");
    }

    #[test]
    fn fresh_quote_within_ttl() {
        let quote = Quote::new(dec!(2000));
        assert!(quote.is_fresh(Duration::from_secs(300)));
        assert!(!quote.is_fresh(Duration::ZERO));
    }
}
