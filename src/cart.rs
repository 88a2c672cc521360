//! Cart
//!
//! The cart store: an insertion-ordered collection of line items keyed by
//! `(product id, selected size)`, persisted through the storage collaborator
//! and broadcast through the change hub after every committed write.
//!
//! The store performs its one storage read at construction, so every
//! instance is fully loaded before a mutation can run. Missing or corrupt
//! persisted state loads as an empty cart; it is logged, never surfaced.

use std::rc::Rc;

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    notify::{ChangeHub, StoreChange},
    products::{ProductId, ProductSnapshot, Size},
    storage::{CART_KEY, Storage, StorageError},
    variants::{effective_stock, effective_unit_price, stock_limit},
};

/// Errors surfaced by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity exceeds the stock recorded in the matching
    /// size variant. The cart is left untouched.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Quantity the mutation would have resulted in.
        requested: u32,
        /// Stock recorded in the matching size variant.
        available: u32,
    },

    /// Wrapped storage write failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Wrapped serialization failure while persisting.
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

/// One row in the cart: a frozen product snapshot, an optional selected
/// size, and the quantity in cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    product: ProductSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<Size>,
    quantity: u32,
}

impl CartLine {
    fn new(product: ProductSnapshot, size: Option<Size>, quantity: u32) -> Self {
        Self {
            product,
            size,
            quantity,
        }
    }

    /// The frozen product snapshot captured when the line was created.
    pub fn product(&self) -> &ProductSnapshot {
        &self.product
    }

    /// The selected size, if the product was added with one.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Quantity in cart. Always positive.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The price charged per unit, after size override and offer discount.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        effective_unit_price(&self.product, self.size)
    }

    /// `unit_price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }

    /// Stock available for this line's selection, per the frozen snapshot.
    #[must_use]
    pub fn available_stock(&self) -> u32 {
        effective_stock(&self.product, self.size)
    }

    fn matches(&self, id: ProductId, size: Option<Size>) -> bool {
        self.product.id == id && self.size == size
    }
}

/// The cart store.
///
/// Owns the in-memory collection, the storage backend it persists through,
/// and a shared [`ChangeHub`] it notifies after each committed write.
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    lines: Vec<CartLine>,
    storage: S,
    hub: Rc<ChangeHub>,
}

impl<S: Storage> CartStore<S> {
    /// Load the cart from `storage` with its own change hub.
    pub fn new(storage: S) -> Self {
        Self::with_hub(storage, Rc::new(ChangeHub::new()))
    }

    /// Load the cart from `storage`, broadcasting through a shared hub.
    pub fn with_hub(storage: S, hub: Rc<ChangeHub>) -> Self {
        let lines = load_lines(&storage);

        Self {
            lines,
            storage,
            hub,
        }
    }

    /// The change hub mutations are broadcast through.
    pub fn hub(&self) -> &Rc<ChangeHub> {
        &self.hub
    }

    /// Add `quantity` units of a product in the given size.
    ///
    /// An existing `(id, size)` line has its quantity incremented; otherwise
    /// a new line freezes the product snapshot as passed. Adding zero units
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// - [`CartError::InsufficientStock`] if the resulting quantity would
    ///   exceed the matching size variant's stock; the cart is unchanged.
    /// - [`CartError::Storage`] / [`CartError::Encode`] if persisting fails.
    pub fn add(
        &mut self,
        product: &ProductSnapshot,
        size: Option<Size>,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(product.id, size)) {
            let requested = line.quantity.saturating_add(quantity);
            check_stock(&line.product, size, requested)?;
            line.quantity = requested;
        } else {
            check_stock(product, size, quantity)?;
            self.lines.push(CartLine::new(product.clone(), size, quantity));
        }

        self.commit()
    }

    /// Set the quantity of an existing line directly.
    ///
    /// A quantity of zero removes the line. An unknown `(id, size)` pair is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// - [`CartError::InsufficientStock`] if `quantity` exceeds the matching
    ///   size variant's stock; the cart is unchanged.
    /// - [`CartError::Storage`] / [`CartError::Encode`] if persisting fails.
    pub fn update_quantity(
        &mut self,
        id: ProductId,
        size: Option<Size>,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(id, size);
        }

        let Some(line) = self.lines.iter_mut().find(|l| l.matches(id, size)) else {
            return Ok(());
        };

        check_stock(&line.product, size, quantity)?;
        line.quantity = quantity;

        self.commit()
    }

    /// Remove the matching line. Absent lines are a no-op and nothing is
    /// persisted or broadcast.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] / [`CartError::Encode`] if persisting
    /// fails.
    pub fn remove(&mut self, id: ProductId, size: Option<Size>) -> Result<(), CartError> {
        let before = self.lines.len();
        self.lines.retain(|l| !l.matches(id, size));

        if self.lines.len() == before {
            return Ok(());
        }

        self.commit()
    }

    /// Empty the cart and persist the empty state.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] / [`CartError::Encode`] if persisting
    /// fails.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.lines.clear();

        self.commit()
    }

    /// Sum of `effective price * quantity` over all lines; zero when empty.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total units in the cart (not distinct lines).
    #[must_use]
    pub fn items_count(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    /// Whether a `(id, size)` line exists.
    #[must_use]
    pub fn contains(&self, id: ProductId, size: Option<Size>) -> bool {
        self.lines.iter().any(|l| l.matches(id, size))
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Re-read persisted state, replacing the in-memory collection.
    ///
    /// Observers receiving a [`StoreChange`] signal call this before
    /// trusting in-memory state that may predate another surface's write.
    pub fn reload(&mut self) {
        self.lines = load_lines(&self.storage);
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

    fn commit(&mut self) -> Result<(), CartError> {
        let payload = serde_json::to_string(&self.lines)?;
        self.storage.write(CART_KEY, &payload)?;

        debug!("cart persisted: {} line(s)", self.lines.len());
        self.hub.notify(StoreChange::Cart);

        Ok(())
    }
}

/// Reject a prospective quantity above the matching variant's stock.
fn check_stock(
    product: &ProductSnapshot,
    size: Option<Size>,
    requested: u32,
) -> Result<(), CartError> {
    match stock_limit(product, size) {
        Some(available) if requested > available => {
            Err(CartError::InsufficientStock {
                requested,
                available,
            })
        }
        _ => Ok(()),
    }
}

fn load_lines<S: Storage>(storage: &S) -> Vec<CartLine> {
    match storage.read(CART_KEY) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(lines) => lines,
            Err(err) => {
                warn!("discarding unreadable cart state: {err}");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!("cart storage read failed, starting empty: {err}");
            Vec::new()
        }
    }
}
