//! Variants
//!
//! Resolution of the effective unit price and available stock for a frozen
//! product snapshot and an optional selected size. A missing variant is a
//! handled fallback, never an error: pricing falls back to the base price
//! and stock to the sum across all variants.

use rust_decimal::Decimal;

use crate::{
    pricing::final_price,
    products::{ProductSnapshot, Size, SizeVariant},
};

/// Finds the variant whose size label matches the selection exactly.
#[must_use]
pub fn variant_for(product: &ProductSnapshot, size: Option<Size>) -> Option<&SizeVariant> {
    let selected = size?;

    product.variants.iter().find(|v| v.size == selected)
}

/// The price used as the base for discounting: the matching variant's
/// override when present, the product base price otherwise.
#[must_use]
pub fn effective_base_price(product: &ProductSnapshot, size: Option<Size>) -> Decimal {
    variant_for(product, size)
        .and_then(|v| v.price)
        .unwrap_or(product.price)
}

/// The price actually charged per unit, after resolving any size override
/// and applying the offer discount.
#[must_use]
pub fn effective_unit_price(product: &ProductSnapshot, size: Option<Size>) -> Decimal {
    final_price(effective_base_price(product, size), product.on_offer)
}

/// The stock available for the selection: the matching variant's quantity,
/// or the sum across all variants when no size is selected or no variant
/// matches. Zero for a product without variants.
#[must_use]
pub fn effective_stock(product: &ProductSnapshot, size: Option<Size>) -> u32 {
    variant_for(product, size).map_or_else(
        || product.variants.iter().map(|v| v.quantity).sum(),
        |v| v.quantity,
    )
}

/// The stock bound a cart mutation must respect: the matching variant's
/// quantity. A selection with no matching variant (or no sizing at all)
/// carries no recorded bound.
#[must_use]
pub fn stock_limit(product: &ProductSnapshot, size: Option<Size>) -> Option<u32> {
    variant_for(product, size).map(|v| v.quantity)
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use crate::products::ProductId;

    use super::*;

    fn shirt() -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId(1),
            name: "Linen Shirt".to_owned(),
            image: None,
            price: Decimal::from(50),
            on_offer: false,
            variants: smallvec![
                SizeVariant {
                    size: Size::S,
                    quantity: 2,
                    price: None,
                },
                SizeVariant {
                    size: Size::M,
                    quantity: 6,
                    price: None,
                },
                SizeVariant {
                    size: Size::L,
                    quantity: 3,
                    price: Some(Decimal::from(54)),
                },
            ],
        }
    }

    #[test]
    fn matching_variant_supplies_stock() {
        assert_eq!(effective_stock(&shirt(), Some(Size::M)), 6);
    }

    #[test]
    fn price_override_wins_over_base_price() {
        assert_eq!(
            effective_unit_price(&shirt(), Some(Size::L)),
            Decimal::from(54)
        );
    }

    #[test]
    fn variant_without_override_uses_base_price() {
        assert_eq!(
            effective_unit_price(&shirt(), Some(Size::M)),
            Decimal::from(50)
        );
    }

    #[test]
    fn missing_variant_falls_back_to_base_and_summed_stock() {
        let product = shirt();

        assert_eq!(
            effective_unit_price(&product, Some(Size::Xl)),
            Decimal::from(50)
        );
        assert_eq!(effective_stock(&product, Some(Size::Xl)), 11);
    }

    #[test]
    fn no_selection_sums_all_variant_stock() {
        assert_eq!(effective_stock(&shirt(), None), 11);
        assert!(variant_for(&shirt(), None).is_none(), "no selected size");
    }

    #[test]
    fn product_without_variants_has_zero_stock() {
        let tote = ProductSnapshot {
            id: ProductId(2),
            name: "Canvas Tote".to_owned(),
            image: None,
            price: Decimal::from(40),
            on_offer: true,
            variants: smallvec![],
        };

        assert_eq!(effective_stock(&tote, None), 0);
        assert_eq!(effective_unit_price(&tote, None), Decimal::from(32));
    }

    #[test]
    fn stock_limit_exists_only_for_a_matching_variant() {
        let product = shirt();

        assert_eq!(stock_limit(&product, Some(Size::M)), Some(6));
        assert_eq!(stock_limit(&product, Some(Size::Xl)), None);
        assert_eq!(stock_limit(&product, None), None);
    }

    #[test]
    fn offer_discount_applies_after_override_resolution() {
        let mut product = shirt();
        product.on_offer = true;

        // 54 on offer -> 43.20
        assert_eq!(
            effective_unit_price(&product, Some(Size::L)),
            Decimal::new(432, 1)
        );
    }
}
