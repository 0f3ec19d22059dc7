//! # Cart Store
//!
//! Per-user shopping carts: `user_id -> { product_id: quantity }`.
//!
//! ## Invariants
//! - Stored quantities are always in `1..=MAX_QUANTITY`; setting a quantity
//!   to zero or below removes the entry instead of storing it, and anything
//!   above the cap is rejected before the cart is touched
//! - Carts are created lazily on first access and *emptied* (not removed)
//!   on clear, so a user who just checked out still owns an empty cart
//!
//! The cap is what makes the money arithmetic downstream total: with
//! quantities bounded and catalog prices small, every line total and
//! subtotal fits comfortably in i64 cents.

use std::collections::{BTreeMap, HashMap};

use crate::catalog::Catalog;
use crate::error::{StoreError, StoreResult};

/// Upper bound on a stored per-item quantity (per request and accumulated).
pub const MAX_QUANTITY: i64 = 1_000_000;

/// One user's cart: product id -> positive quantity.
///
/// BTreeMap keeps entries in id order so cart views and order snapshots come
/// out in a stable order.
pub type CartEntries = BTreeMap<u32, i64>;

/// All carts, keyed by opaque user id.
#[derive(Debug, Default)]
pub struct CartStore {
    carts: HashMap<String, CartEntries>,
}

impl CartStore {
    pub fn new() -> Self {
        CartStore::default()
    }

    /// Returns the user's cart entries, creating an empty cart if absent.
    pub fn entries(&mut self, user_id: &str) -> &CartEntries {
        self.entries_mut(user_id)
    }

    fn entries_mut(&mut self, user_id: &str) -> &mut CartEntries {
        self.carts.entry(user_id.to_string()).or_default()
    }

    /// Increments a product's quantity in the user's cart.
    ///
    /// Fails with `UnknownProduct` for ids outside the catalog,
    /// `InvalidQuantity` for non-positive quantities and `QuantityTooLarge`
    /// when the request or the accumulated quantity would exceed
    /// [`MAX_QUANTITY`]. Nothing is mutated on failure.
    pub fn add(
        &mut self,
        catalog: &Catalog,
        user_id: &str,
        product_id: u32,
        quantity: i64,
    ) -> StoreResult<()> {
        if !catalog.contains(product_id) {
            return Err(StoreError::UnknownProduct { product_id });
        }
        if quantity <= 0 {
            return Err(StoreError::InvalidQuantity { quantity });
        }
        if quantity > MAX_QUANTITY {
            return Err(StoreError::QuantityTooLarge { max: MAX_QUANTITY });
        }

        let cart = self.entries_mut(user_id);
        let current = cart.get(&product_id).copied().unwrap_or(0);
        // Both sides are at most MAX_QUANTITY, so the sum cannot overflow
        let updated = current + quantity;
        if updated > MAX_QUANTITY {
            return Err(StoreError::QuantityTooLarge { max: MAX_QUANTITY });
        }
        cart.insert(product_id, updated);
        Ok(())
    }

    /// Sets a product's quantity exactly (no increment).
    ///
    /// A quantity <= 0 removes the entry and never errors, even when the
    /// product id is unknown: removal of something absent is a no-op.
    pub fn set(
        &mut self,
        catalog: &Catalog,
        user_id: &str,
        product_id: u32,
        quantity: i64,
    ) -> StoreResult<()> {
        let cart = self.entries_mut(user_id);
        if quantity <= 0 {
            cart.remove(&product_id);
            return Ok(());
        }

        if !catalog.contains(product_id) {
            return Err(StoreError::UnknownProduct { product_id });
        }
        if quantity > MAX_QUANTITY {
            return Err(StoreError::QuantityTooLarge { max: MAX_QUANTITY });
        }
        cart.insert(product_id, quantity);
        Ok(())
    }

    /// Removes a product from the user's cart. No error if absent.
    pub fn remove(&mut self, user_id: &str, product_id: u32) {
        self.entries_mut(user_id).remove(&product_id);
    }

    /// Resets the user's cart to empty.
    pub fn clear(&mut self, user_id: &str) {
        self.entries_mut(user_id).clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::default()
    }

    #[test]
    fn test_add_accumulates() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        carts.add(&catalog, "u1", 1, 2).unwrap();
        carts.add(&catalog, "u1", 1, 3).unwrap();

        assert_eq!(carts.entries("u1").get(&1), Some(&5));
    }

    #[test]
    fn test_add_rejects_unknown_product() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        let err = carts.add(&catalog, "u1", 99, 1).unwrap_err();
        assert_eq!(err, StoreError::UnknownProduct { product_id: 99 });
        assert!(carts.entries("u1").is_empty());
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        assert_eq!(
            carts.add(&catalog, "u1", 1, 0),
            Err(StoreError::InvalidQuantity { quantity: 0 })
        );
        assert_eq!(
            carts.add(&catalog, "u1", 1, -4),
            Err(StoreError::InvalidQuantity { quantity: -4 })
        );
    }

    #[test]
    fn test_add_rejects_quantity_above_cap() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        assert_eq!(
            carts.add(&catalog, "u1", 1, MAX_QUANTITY + 1),
            Err(StoreError::QuantityTooLarge { max: MAX_QUANTITY })
        );
        assert_eq!(
            carts.add(&catalog, "u1", 1, 200_000_000_000_000),
            Err(StoreError::QuantityTooLarge { max: MAX_QUANTITY })
        );
        assert!(carts.entries("u1").is_empty());
    }

    #[test]
    fn test_add_caps_the_accumulated_quantity() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        // Each request is within the cap; their sum is not
        carts.add(&catalog, "u1", 1, MAX_QUANTITY).unwrap();
        assert_eq!(
            carts.add(&catalog, "u1", 1, 1),
            Err(StoreError::QuantityTooLarge { max: MAX_QUANTITY })
        );
        // The rejected add left the stored quantity untouched
        assert_eq!(carts.entries("u1").get(&1), Some(&MAX_QUANTITY));
    }

    #[test]
    fn test_set_rejects_quantity_above_cap() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        carts.add(&catalog, "u1", 1, 2).unwrap();
        assert_eq!(
            carts.set(&catalog, "u1", 1, MAX_QUANTITY + 1),
            Err(StoreError::QuantityTooLarge { max: MAX_QUANTITY })
        );
        assert_eq!(carts.entries("u1").get(&1), Some(&2));
    }

    #[test]
    fn test_set_overwrites_exactly() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        carts.add(&catalog, "u1", 1, 2).unwrap();
        carts.set(&catalog, "u1", 1, 7).unwrap();

        assert_eq!(carts.entries("u1").get(&1), Some(&7));
    }

    #[test]
    fn test_set_zero_or_negative_removes_without_error() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        carts.add(&catalog, "u1", 1, 2).unwrap();
        carts.set(&catalog, "u1", 1, 0).unwrap();
        assert!(carts.entries("u1").is_empty());

        // Removal path skips the catalog check entirely: unknown ids are fine
        carts.set(&catalog, "u1", 99, -3).unwrap();
        carts.set(&catalog, "u1", 99, 0).unwrap();
    }

    #[test]
    fn test_set_rejects_unknown_product_for_positive_quantity() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        let err = carts.set(&catalog, "u1", 99, 2).unwrap_err();
        assert_eq!(err, StoreError::UnknownProduct { product_id: 99 });
    }

    #[test]
    fn test_remove_is_idempotent() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        carts.add(&catalog, "u1", 1, 2).unwrap();
        carts.remove("u1", 1);
        carts.remove("u1", 1); // absent, still no error
        carts.remove("u1", 99);

        assert!(carts.entries("u1").is_empty());
    }

    #[test]
    fn test_carts_are_per_user() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        carts.add(&catalog, "alice", 1, 1).unwrap();
        carts.add(&catalog, "bob", 2, 2).unwrap();

        assert_eq!(carts.entries("alice").get(&1), Some(&1));
        assert!(carts.entries("alice").get(&2).is_none());
        assert_eq!(carts.entries("bob").get(&2), Some(&2));
    }

    #[test]
    fn test_clear_empties_but_keeps_cart() {
        let catalog = catalog();
        let mut carts = CartStore::new();

        carts.add(&catalog, "u1", 1, 2).unwrap();
        carts.clear("u1");

        assert!(carts.entries("u1").is_empty());
        // Adding again works against the same (now empty) cart
        carts.add(&catalog, "u1", 2, 1).unwrap();
        assert_eq!(carts.entries("u1").len(), 1);
    }
}
