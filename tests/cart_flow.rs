//! Integration test walking a full browsing session against the `summer`
//! catalog fixture.
//!
//! Expected totals, step by step:
//!
//! 1. Add the Linen Shirt (id 1, $50.00, not on offer) in size M
//!    - total $50.00, 1 unit
//! 2. Add the same shirt in M again
//!    - one line with quantity 2, total $100.00, 2 units
//! 3. Add the Canvas Tote (id 2, $40.00, on offer, unsized)
//!    - the tote is 20% off: $32.00
//!    - total $132.00, 3 units
//! 4. Set the shirt's quantity to 0
//!    - the line disappears entirely
//!    - total $32.00, 1 unit

use rust_decimal::Decimal;
use testresult::TestResult;

use wardrobe::{
    cart::{CartLine, CartStore},
    fixtures::Catalog,
    products::{ProductId, Size},
    storage::MemoryStorage,
};

#[test]
fn browsing_session_matches_expected_totals() -> TestResult {
    let catalog = Catalog::from_set("summer")?;
    let mut cart = CartStore::new(MemoryStorage::new());

    assert_eq!(cart.total(), Decimal::ZERO);
    assert_eq!(cart.items_count(), 0);

    let shirt = catalog.product("linen_shirt")?;
    cart.add(shirt, Some(Size::M), 1)?;

    assert_eq!(cart.total(), Decimal::from(50));
    assert_eq!(cart.items_count(), 1);

    cart.add(shirt, Some(Size::M), 1)?;

    assert_eq!(cart.len(), 1, "same (product, size) merges into one line");
    assert_eq!(cart.total(), Decimal::from(100));
    assert_eq!(cart.items_count(), 2);

    let tote = catalog.product("canvas_tote")?;
    cart.add(tote, None, 1)?;

    assert_eq!(cart.total(), Decimal::from(132), "40 on offer charges 32");
    assert_eq!(cart.items_count(), 3);

    cart.update_quantity(ProductId(1), Some(Size::M), 0)?;

    assert!(!cart.contains(ProductId(1), Some(Size::M)));
    assert_eq!(cart.total(), Decimal::from(32));
    assert_eq!(cart.items_count(), 1);

    Ok(())
}

#[test]
fn totals_track_single_line_quantity_changes_exactly() -> TestResult {
    let catalog = Catalog::from_set("summer")?;
    let mut cart = CartStore::new(MemoryStorage::new());

    let shirt = catalog.product("linen_shirt")?;
    let jacket = catalog.product("denim_jacket")?;

    cart.add(shirt, Some(Size::M), 2)?;
    cart.add(jacket, Some(Size::M), 1)?;

    let before = cart.total();
    cart.update_quantity(shirt.id, Some(Size::M), 3)?;

    // Only the shirt line's delta moves the total: one more unit at $50.
    assert_eq!(cart.total() - before, Decimal::from(50));

    let per_line: Decimal = cart.lines().iter().map(CartLine::line_total).sum();
    assert_eq!(cart.total(), per_line);

    Ok(())
}

#[test]
fn size_overrides_flow_through_the_total() -> TestResult {
    let catalog = Catalog::from_set("summer")?;
    let mut cart = CartStore::new(MemoryStorage::new());

    // The XL jacket carries an $89 override; the jacket is 20% off.
    let jacket = catalog.product("denim_jacket")?;
    cart.add(jacket, Some(Size::Xl), 2)?;

    assert_eq!(cart.total(), Decimal::new(14240, 2));

    Ok(())
}

#[test]
fn stock_recorded_in_the_fixture_bounds_mutations() -> TestResult {
    let catalog = Catalog::from_set("summer")?;
    let mut cart = CartStore::new(MemoryStorage::new());

    let jacket = catalog.product("denim_jacket")?;
    cart.add(jacket, Some(Size::S), 1)?;

    assert!(
        cart.add(jacket, Some(Size::S), 1).is_err(),
        "only one small jacket is in stock"
    );
    assert!(
        cart.update_quantity(jacket.id, Some(Size::S), 2).is_err(),
        "updates are bounded too"
    );
    assert_eq!(cart.items_count(), 1, "rejections leave the cart untouched");

    Ok(())
}
