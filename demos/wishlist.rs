//! Wishlist Demo
//!
//! Shows the toggle semantics: saving a product twice removes it again, and
//! every committed mutation is broadcast to subscribers.
//!
//! Use `-f` to load a catalog fixture set by name.

use anyhow::Result;
use clap::Parser;
use wardrobe::{
    fixtures::Catalog,
    storage::MemoryStorage,
    utils::DemoArgs,
    wishlist::{WishlistStore, WishlistToggle},
};

/// Wishlist Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    env_logger::init();

    let args = DemoArgs::parse();
    let catalog = Catalog::from_set(&args.fixture)?;

    let mut wishlist = WishlistStore::new(MemoryStorage::new());

    let badge = wishlist
        .hub()
        .subscribe(|change| println!("[sidebar] {change:?} store changed"));

    let jacket = catalog.product("denim_jacket")?;
    let scarf = catalog.product("wool_scarf")?;

    for product in [jacket, scarf, jacket] {
        match wishlist.toggle(product)? {
            WishlistToggle::Added => println!("saved {}", product.name),
            WishlistToggle::Removed => println!("removed {}", product.name),
        }
    }

    println!("\n{} product(s) saved:", wishlist.len());
    for entry in wishlist.entries() {
        println!("  {} ({} in stock)", entry.name, entry.stock);
    }

    wishlist.hub().unsubscribe(badge);

    Ok(())
}
