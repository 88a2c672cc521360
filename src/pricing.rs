//! Pricing
//!
//! The storefront runs a single site-wide promotion: a fixed percentage off
//! any product flagged as on offer.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

/// Percentage taken off the price of on-offer products.
pub const OFFER_DISCOUNT_PERCENT: u32 = 20;

/// The offer discount as a ratio.
fn offer_percentage() -> Percentage {
    Percentage::from(f64::from(OFFER_DISCOUNT_PERCENT) / 100.0)
}

/// Calculates the price actually charged for a base price.
///
/// Returns the base price unchanged when the product is not on offer or the
/// price is zero or negative; otherwise the base price less
/// [`OFFER_DISCOUNT_PERCENT`] percent. Pure and total.
#[must_use]
pub fn final_price(base_price: Decimal, on_offer: bool) -> Decimal {
    if !on_offer || base_price <= Decimal::ZERO {
        return base_price;
    }

    base_price - offer_percentage() * base_price
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_on_offer_is_identity() {
        let price = Decimal::new(4999, 2);

        assert_eq!(final_price(price, false), price);
    }

    #[test]
    fn zero_and_negative_prices_pass_through() {
        assert_eq!(final_price(Decimal::ZERO, true), Decimal::ZERO);

        let negative = Decimal::from(-5);
        assert_eq!(final_price(negative, true), negative);
    }

    #[test]
    fn offer_takes_twenty_percent_off() {
        assert_eq!(final_price(Decimal::from(50), true), Decimal::from(40));
        assert_eq!(final_price(Decimal::from(40), true), Decimal::from(32));
        assert_eq!(
            final_price(Decimal::new(4999, 2), true),
            Decimal::new(39_992, 3)
        );
    }

    #[test]
    fn discounted_price_is_strictly_below_base() {
        for cents in [1i64, 99, 2500, 123_456] {
            let base = Decimal::new(cents, 2);

            assert!(
                final_price(base, true) < base,
                "discounted {base} should be below base"
            );
        }
    }
}
