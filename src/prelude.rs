//! Wardrobe prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartError, CartLine, CartStore},
    fixtures::{Catalog, FixtureError},
    notify::{ChangeHub, StoreChange, SubscriberKey},
    pricing::{OFFER_DISCOUNT_PERCENT, final_price},
    products::{ProductId, ProductSnapshot, Size, SizeVariant},
    receipt::CartReceipt,
    storage::{CART_KEY, FileStorage, MemoryStorage, Storage, StorageError, WISHLIST_KEY},
    variants::{effective_stock, effective_unit_price, stock_limit, variant_for},
    wishlist::{WishlistEntry, WishlistError, WishlistStore, WishlistToggle},
};
