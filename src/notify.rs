//! Notify
//!
//! Change signaling between the stores and the UI surfaces observing them.
//! Observers receive only which store changed and are expected to re-read
//! the store's current state; the store remains the single source of truth
//! and the payload carries no data an observer could cache and drift on.

use std::{cell::RefCell, fmt, rc::Rc};

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle returned by [`ChangeHub::subscribe`], used to unsubscribe.
    pub struct SubscriberKey;
}

/// Which store committed a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// The cart collection changed.
    Cart,
    /// The wishlist collection changed.
    Wishlist,
}

type Callback = Rc<dyn Fn(StoreChange)>;

/// Observer registry broadcast to after every committed store write.
///
/// Subscription and unsubscription are symmetric: every subscriber holds a
/// [`SubscriberKey`] and removes itself on teardown. Keys are slotmap keys,
/// so unsubscribing twice (or with a stale key) is harmless.
#[derive(Default)]
pub struct ChangeHub {
    subscribers: RefCell<SlotMap<SubscriberKey, Callback>>,
}

impl fmt::Debug for ChangeHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeHub")
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

impl ChangeHub {
    /// Create a hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` to run after every committed store mutation.
    pub fn subscribe(&self, callback: impl Fn(StoreChange) + 'static) -> SubscriberKey {
        self.subscribers.borrow_mut().insert(Rc::new(callback))
    }

    /// Remove a subscriber. Returns whether the key was still registered.
    pub fn unsubscribe(&self, key: SubscriberKey) -> bool {
        self.subscribers.borrow_mut().remove(key).is_some()
    }

    /// Broadcast `change` to every subscriber.
    ///
    /// Callbacks are cloned out of the registry before any of them runs, so
    /// a subscriber may subscribe or unsubscribe from inside its callback.
    pub fn notify(&self, change: StoreChange) {
        let callbacks: Vec<Callback> = self.subscribers.borrow().values().cloned().collect();

        for callback in callbacks {
            callback(change);
        }
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}
