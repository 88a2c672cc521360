//! Storefront Demo
//!
//! Walks a browsing session against a catalog fixture: add to cart, bump a
//! quantity past the recorded stock, adjust, and print the final receipt.
//!
//! Use `-f` to load a catalog fixture set by name.

use std::io;

use anyhow::Result;
use clap::Parser;
use rusty_money::iso;
use wardrobe::{
    cart::CartStore,
    fixtures::Catalog,
    notify::StoreChange,
    products::Size,
    receipt::CartReceipt,
    storage::MemoryStorage,
    utils::DemoArgs,
};

/// Storefront Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    env_logger::init();

    let args = DemoArgs::parse();
    let catalog = Catalog::from_set(&args.fixture)?;

    let mut cart = CartStore::new(MemoryStorage::new());

    let badge = cart.hub().subscribe(|change| {
        if change == StoreChange::Cart {
            println!("[header badge] cart changed, re-reading aggregates");
        }
    });

    let shirt = catalog.product("linen_shirt")?;
    cart.add(shirt, Some(Size::M), 1)?;
    cart.add(shirt, Some(Size::M), 1)?;

    let jacket = catalog.product("denim_jacket")?;
    cart.add(jacket, Some(Size::S), 1)?;

    // The fixture records a single small jacket; the store rejects the rest.
    if let Err(err) = cart.add(jacket, Some(Size::S), 1) {
        println!("rejected: {err}");
    }

    let tote = catalog.product("canvas_tote")?;
    cart.add(tote, None, 1)?;
    cart.update_quantity(tote.id, None, 2)?;

    println!(
        "\n{} unit(s) across {} line(s)\n",
        cart.items_count(),
        cart.len()
    );

    let currency = catalog.currency().unwrap_or(iso::USD);
    let receipt = CartReceipt::from_cart(&cart, currency);
    receipt.write_to(&mut io::stdout().lock())?;

    cart.hub().unsubscribe(badge);

    Ok(())
}
