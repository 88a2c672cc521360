//! Wishlist
//!
//! The wishlist store: a set of saved products with frozen display
//! snapshots, independent of the cart. Saving an already-saved product
//! removes it, and the outcome is reported so callers can show the right
//! feedback.

use std::rc::Rc;

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    notify::{ChangeHub, StoreChange},
    products::{ProductId, ProductSnapshot},
    storage::{Storage, StorageError, WISHLIST_KEY},
    variants::effective_stock,
};

/// Errors surfaced by wishlist mutations.
#[derive(Debug, Error)]
pub enum WishlistError {
    /// Wrapped storage write failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Wrapped serialization failure while persisting.
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

/// Net effect of a [`WishlistStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    /// The product was not saved; it is now.
    Added,
    /// The product was already saved; it has been removed.
    Removed,
}

/// A saved product: the display fields frozen at the moment of saving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    /// Catalog identifier of the saved product.
    pub product: ProductId,

    /// Product name
    pub name: String,

    /// Unit base price
    pub price: Decimal,

    /// Whether the product was on offer when saved
    pub on_offer: bool,

    /// Image reference for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Total stock across all size variants when saved
    pub stock: u32,
}

impl WishlistEntry {
    fn from_snapshot(product: &ProductSnapshot) -> Self {
        Self {
            product: product.id,
            name: product.name.clone(),
            price: product.price,
            on_offer: product.on_offer,
            image: product.image.clone(),
            stock: effective_stock(product, None),
        }
    }
}

/// The wishlist store.
#[derive(Debug)]
pub struct WishlistStore<S: Storage> {
    entries: Vec<WishlistEntry>,
    storage: S,
    hub: Rc<ChangeHub>,
}

impl<S: Storage> WishlistStore<S> {
    /// Load the wishlist from `storage` with its own change hub.
    pub fn new(storage: S) -> Self {
        Self::with_hub(storage, Rc::new(ChangeHub::new()))
    }

    /// Load the wishlist from `storage`, broadcasting through a shared hub.
    pub fn with_hub(storage: S, hub: Rc<ChangeHub>) -> Self {
        let entries = load_entries(&storage);

        Self {
            entries,
            storage,
            hub,
        }
    }

    /// The change hub mutations are broadcast through.
    pub fn hub(&self) -> &Rc<ChangeHub> {
        &self.hub
    }

    /// Save a product, or remove it if it is already saved.
    ///
    /// Reports whether the net effect was an addition or a removal.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::Storage`] / [`WishlistError::Encode`] if
    /// persisting fails.
    pub fn toggle(&mut self, product: &ProductSnapshot) -> Result<WishlistToggle, WishlistError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.product != product.id);

        let outcome = if self.entries.len() == before {
            self.entries.push(WishlistEntry::from_snapshot(product));
            WishlistToggle::Added
        } else {
            WishlistToggle::Removed
        };

        self.commit()?;

        Ok(outcome)
    }

    /// Remove a saved product unconditionally. Absent products are a no-op
    /// and nothing is persisted or broadcast.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::Storage`] / [`WishlistError::Encode`] if
    /// persisting fails.
    pub fn remove(&mut self, id: ProductId) -> Result<(), WishlistError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.product != id);

        if self.entries.len() == before {
            return Ok(());
        }

        self.commit()
    }

    /// Empty the wishlist and persist the empty state.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::Storage`] / [`WishlistError::Encode`] if
    /// persisting fails.
    pub fn clear(&mut self) -> Result<(), WishlistError> {
        self.entries.clear();

        self.commit()
    }

    /// Whether a product is saved.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.entries.iter().any(|e| e.product == id)
    }

    /// The saved entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-read persisted state, replacing the in-memory collection.
    pub fn reload(&mut self) {
        self.entries = load_entries(&self.storage);
    }

    /// Read-only access to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Tear the store down, returning its storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn commit(&mut self) -> Result<(), WishlistError> {
        let payload = serde_json::to_string(&self.entries)?;
        self.storage.write(WISHLIST_KEY, &payload)?;

        debug!("wishlist persisted: {} entry(ies)", self.entries.len());
        self.hub.notify(StoreChange::Wishlist);

        Ok(())
    }
}

fn load_entries<S: Storage>(storage: &S) -> Vec<WishlistEntry> {
    match storage.read(WISHLIST_KEY) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("discarding unreadable wishlist state: {err}");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!("wishlist storage read failed, starting empty: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        products::{Size, SizeVariant},
        storage::MemoryStorage,
    };

    use super::*;

    fn jacket() -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId(3),
            name: "Denim Jacket".to_owned(),
            image: Some("/images/denim-jacket.jpg".to_owned()),
            price: Decimal::from(85),
            on_offer: true,
            variants: smallvec![
                SizeVariant {
                    size: Size::S,
                    quantity: 1,
                    price: None,
                },
                SizeVariant {
                    size: Size::M,
                    quantity: 4,
                    price: None,
                },
            ],
        }
    }

    fn empty_wishlist() -> WishlistStore<MemoryStorage> {
        WishlistStore::new(MemoryStorage::new())
    }

    #[test]
    fn toggle_reports_added_then_removed() -> TestResult {
        let mut wishlist = empty_wishlist();
        let product = jacket();

        assert_eq!(wishlist.toggle(&product)?, WishlistToggle::Added);
        assert!(wishlist.contains(ProductId(3)));

        assert_eq!(wishlist.toggle(&product)?, WishlistToggle::Removed);
        assert!(!wishlist.contains(ProductId(3)));

        Ok(())
    }

    #[test]
    fn double_toggle_is_the_identity() -> TestResult {
        let mut wishlist = empty_wishlist();
        let product = jacket();

        let before = wishlist.contains(product.id);
        wishlist.toggle(&product)?;
        wishlist.toggle(&product)?;

        assert_eq!(wishlist.contains(product.id), before);
        assert!(wishlist.is_empty());

        Ok(())
    }

    #[test]
    fn entries_freeze_display_fields_and_summed_stock() -> TestResult {
        let mut wishlist = empty_wishlist();

        wishlist.toggle(&jacket())?;

        let Some(entry) = wishlist.entries().first() else {
            unreachable!("entry was just added")
        };

        assert_eq!(entry.name, "Denim Jacket");
        assert_eq!(entry.price, Decimal::from(85));
        assert!(entry.on_offer, "offer flag is frozen");
        assert_eq!(entry.stock, 5);

        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let mut wishlist = empty_wishlist();

        wishlist.toggle(&jacket())?;
        wishlist.remove(ProductId(3))?;
        wishlist.remove(ProductId(3))?;
        wishlist.remove(ProductId(99))?;

        assert!(wishlist.is_empty());

        Ok(())
    }

    #[test]
    fn clear_empties_the_collection() -> TestResult {
        let mut wishlist = empty_wishlist();

        wishlist.toggle(&jacket())?;
        wishlist.clear()?;

        assert!(wishlist.is_empty());

        let persisted = wishlist.storage().read(WISHLIST_KEY)?;
        assert_eq!(persisted.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn mutations_broadcast_wishlist_changes() -> TestResult {
        use std::cell::Cell;

        let mut wishlist = empty_wishlist();
        let signals = Rc::new(Cell::new(0u32));

        let seen = Rc::clone(&signals);
        wishlist.hub().subscribe(move |change| {
            if change == StoreChange::Wishlist {
                seen.set(seen.get() + 1);
            }
        });

        wishlist.toggle(&jacket())?;
        wishlist.remove(ProductId(3))?;

        assert_eq!(signals.get(), 2);

        Ok(())
    }

    #[test]
    fn corrupt_persisted_state_loads_as_empty() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.write(WISHLIST_KEY, "{broken")?;

        let wishlist = WishlistStore::new(storage);

        assert!(wishlist.is_empty());

        Ok(())
    }

    #[test]
    fn persisted_state_survives_a_fresh_store() -> TestResult {
        let mut wishlist = empty_wishlist();
        wishlist.toggle(&jacket())?;

        let original = wishlist.entries().to_vec();
        let fresh = WishlistStore::new(wishlist.into_storage());

        assert_eq!(fresh.entries(), original.as_slice());

        Ok(())
    }
}
