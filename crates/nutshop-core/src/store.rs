//! # In-Memory Store
//!
//! The single owner of all mutable state: catalog, carts, order ledger and
//! discount engine. Everything lives in memory for the lifetime of the
//! process; a restart resets carts, orders and codes to the catalog-only
//! initial state.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  request ──► cart ops ──► place_order                           │
//! │                              │                                  │
//! │                              ├─ read cart (EmptyCart?)          │
//! │                              ├─ validate code (discount engine) │
//! │                              ├─ snapshot items, money totals    │
//! │                              ├─ append order, clear cart        │
//! │                              └─ consume code                    │
//! │                                                                 │
//! │  stats() reads the ledger + code history, never mutates         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is explicitly constructed and handed to whoever needs it; there
//! is no process-wide singleton. Tests build a fresh store each.

use serde::Serialize;

use crate::cart::{CartEntries, CartStore};
use crate::catalog::Catalog;
use crate::discount::{DiscountCode, DiscountEngine};
use crate::error::{StoreError, StoreResult};
use crate::money::Money;
use crate::order::{Order, OrderItem};
use crate::stats::StoreStats;

/// Tunables for a store instance.
#[derive(Debug, Clone, Copy)]
pub struct StoreConfig {
    /// Every nth order is eligible for a discount code.
    pub nth_order_for_discount: u64,
    /// Flat percentage a code takes off the subtotal.
    pub discount_pct: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            nth_order_for_discount: crate::discount::DEFAULT_NTH_ORDER,
            discount_pct: crate::discount::DEFAULT_DISCOUNT_PCT,
        }
    }
}

/// One line of a cart view.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product_id: u32,
    pub quantity: i64,
}

/// The GET /cart/ payload: lines plus the running total.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: Money,
}

/// The in-memory store.
pub struct Store {
    catalog: Catalog,
    carts: CartStore,
    /// Append-only order ledger. `orders[i].id == i + 1` always holds.
    orders: Vec<Order>,
    discounts: DiscountEngine,
}

impl Store {
    /// Builds a store over the default demo catalog.
    pub fn new(config: StoreConfig) -> Self {
        Store::with_catalog(config, Catalog::default())
    }

    /// Builds a store over an explicit catalog (used by tests).
    pub fn with_catalog(config: StoreConfig, catalog: Catalog) -> Self {
        Store {
            catalog,
            carts: CartStore::new(),
            orders: Vec::new(),
            discounts: DiscountEngine::new(config.nth_order_for_discount, config.discount_pct),
        }
    }

    // Catalog ----------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // Cart operations --------------------------------------------------------

    /// Increments a product's quantity in the user's cart.
    pub fn add_to_cart(&mut self, user_id: &str, product_id: u32, quantity: i64) -> StoreResult<()> {
        self.carts.add(&self.catalog, user_id, product_id, quantity)
    }

    /// Returns the user's cart entries, creating an empty cart if absent.
    pub fn get_cart(&mut self, user_id: &str) -> &CartEntries {
        self.carts.entries(user_id)
    }

    /// Sets a product's quantity exactly; <= 0 removes the entry.
    pub fn set_cart_item(
        &mut self,
        user_id: &str,
        product_id: u32,
        quantity: i64,
    ) -> StoreResult<()> {
        self.carts.set(&self.catalog, user_id, product_id, quantity)
    }

    /// Removes a product from the user's cart (no error if absent).
    pub fn remove_cart_item(&mut self, user_id: &str, product_id: u32) {
        self.carts.remove(user_id, product_id);
    }

    /// Resets the user's cart to empty.
    pub fn clear_cart(&mut self, user_id: &str) {
        self.carts.clear(user_id);
    }

    /// The user's cart lines plus a computed total.
    ///
    /// Entries whose product has vanished from the catalog are silently
    /// skipped, same as at checkout.
    pub fn cart_view(&mut self, user_id: &str) -> CartView {
        let catalog = &self.catalog;
        let mut items = Vec::new();
        let mut total = Money::zero();
        for (&product_id, &quantity) in self.carts.entries(user_id) {
            let Some(product) = catalog.get(product_id) else {
                continue;
            };
            total += product.price * quantity;
            items.push(CartLine {
                product_id,
                quantity,
            });
        }
        CartView { items, total }
    }

    // Checkout ---------------------------------------------------------------

    /// Converts the user's cart into an immutable order.
    ///
    /// Validation happens before any state change: on error the cart, the
    /// ledger and the discount engine are all untouched. On success the
    /// order is appended, the cart is cleared, and an applied code is
    /// consumed, in that sequence.
    pub fn place_order(
        &mut self,
        user_id: &str,
        discount_code: Option<&str>,
    ) -> StoreResult<Order> {
        if self.carts.entries(user_id).is_empty() {
            return Err(StoreError::EmptyCart);
        }

        // A supplied code must validate before we touch anything. The two
        // failure modes read differently to the user: the order simply is
        // not the nth, or the code itself is wrong/consumed.
        let order_count = self.orders.len() as u64;
        let applied_code = match discount_code {
            Some(code) if self.discounts.validate(code, order_count) => Some(code.to_string()),
            Some(_) if !self.discounts.eligible(order_count) => {
                return Err(StoreError::DiscountNotEligible {
                    nth: self.discounts.nth(),
                });
            }
            Some(_) => return Err(StoreError::InvalidDiscountCode),
            None => None,
        };

        // Snapshot: copy name and price out of the catalog now. Entries
        // referencing a product no longer in the catalog are skipped.
        let catalog = &self.catalog;
        let mut items = Vec::new();
        let mut subtotal = Money::zero();
        for (&product_id, &quantity) in self.carts.entries(user_id) {
            let Some(product) = catalog.get(product_id) else {
                continue;
            };
            let line_total = product.price * quantity;
            subtotal += line_total;
            items.push(OrderItem {
                product_id,
                name: product.name.clone(),
                price: product.price,
                quantity,
                line_total,
            });
        }

        let discount = match applied_code {
            Some(_) => subtotal.percentage(self.discounts.discount_pct()),
            None => Money::zero(),
        };
        let total = subtotal - discount;

        let id = self.orders.len() as u64 + 1;
        let order = Order {
            id,
            user_id: user_id.to_string(),
            items,
            subtotal,
            discount,
            total,
            created_at: chrono::Utc::now(),
            discount_code: applied_code.clone(),
        };

        self.orders.push(order.clone());
        self.carts.clear(user_id);
        if let Some(code) = applied_code {
            self.discounts.consume(&code, id);
        }

        Ok(order)
    }

    // Discounts --------------------------------------------------------------

    /// True iff the next order to be placed would be the nth.
    pub fn eligible_now(&self) -> bool {
        self.discounts.eligible(self.orders.len() as u64)
    }

    /// True iff a code is currently available for redemption.
    pub fn has_active_code(&self) -> bool {
        self.discounts.has_active_code()
    }

    /// Mints a new active discount code, subject to the engine's gates.
    pub fn generate_discount_code(&mut self) -> StoreResult<DiscountCode> {
        self.discounts.generate(self.orders.len() as u64)
    }

    /// The configured eligibility threshold.
    pub fn discount_nth(&self) -> u64 {
        self.discounts.nth()
    }

    // Read side --------------------------------------------------------------

    /// Number of orders placed so far.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// The full ledger, oldest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Aggregate stats, recomputed on every call.
    pub fn stats(&self) -> StoreStats {
        StoreStats::compute(&self.orders, self.discounts.history())
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new(StoreConfig::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    fn store() -> Store {
        Store::new(StoreConfig::default())
    }

    /// nth = 1 makes every order eligible, handy for discount tests.
    fn store_every_order_eligible() -> Store {
        Store::new(StoreConfig {
            nth_order_for_discount: 1,
            discount_pct: 10,
        })
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let mut store = store();
        assert_eq!(store.place_order("u1", None), Err(StoreError::EmptyCart));
        assert_eq!(store.order_count(), 0);
    }

    #[test]
    fn test_checkout_without_discount() {
        let mut store = store();
        store.add_to_cart("u1", 1, 2).unwrap();

        let view = store.cart_view("u1");
        assert_eq!(view.total.to_string(), "1500.00");

        let order = store.place_order("u1", None).unwrap();

        assert_eq!(order.id, 1);
        assert_eq!(order.user_id, "u1");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].line_total.to_string(), "1500.00");
        assert_eq!(order.subtotal.to_string(), "1500.00");
        assert_eq!(order.discount.to_string(), "0.00");
        assert_eq!(order.total.to_string(), "1500.00");
        assert!(order.discount_code.is_none());

        // Checkout clears the cart
        assert!(store.get_cart("u1").is_empty());
        assert_eq!(store.order_count(), 1);
    }

    #[test]
    fn test_order_ids_are_sequential_from_one() {
        let mut store = store();
        for expected_id in 1..=3 {
            store.add_to_cart("u1", 1, 1).unwrap();
            let order = store.place_order("u1", None).unwrap();
            assert_eq!(order.id, expected_id);
        }
    }

    #[test]
    fn test_order_snapshot_is_decoupled_from_catalog() {
        let mut store = store();
        store.add_to_cart("u1", 2, 2).unwrap();
        let order = store.place_order("u1", None).unwrap();

        assert_eq!(order.items[0].name, "Cashews 500g");
        assert_eq!(order.items[0].price, Money::from_major(350));
    }

    #[test]
    fn test_checkout_with_discount() {
        let mut store = store_every_order_eligible();
        let code = store.generate_discount_code().unwrap();

        store.add_to_cart("u1", 2, 2).unwrap();
        let order = store.place_order("u1", Some(&code.code)).unwrap();

        assert_eq!(order.subtotal.to_string(), "700.00");
        assert_eq!(order.discount.to_string(), "70.00");
        assert_eq!(order.total.to_string(), "630.00");
        assert_eq!(order.discount_code.as_deref(), Some(code.code.as_str()));
        assert!(!store.has_active_code());
    }

    #[test]
    fn test_redeemed_code_cannot_be_reused() {
        let mut store = store_every_order_eligible();
        let code = store.generate_discount_code().unwrap();

        store.add_to_cart("u1", 2, 2).unwrap();
        store.place_order("u1", Some(&code.code)).unwrap();

        // Same code on a fresh cart fails, and fails the same way again
        store.add_to_cart("u1", 1, 1).unwrap();
        for _ in 0..2 {
            assert_eq!(
                store.place_order("u1", Some(&code.code)),
                Err(StoreError::InvalidDiscountCode)
            );
        }
        // The failed checkout left the cart alone
        assert!(!store.get_cart("u1").is_empty());
    }

    #[test]
    fn test_checkout_with_code_when_not_eligible() {
        let mut store = store(); // nth = 5, order 1 is not eligible
        store.add_to_cart("u1", 1, 1).unwrap();

        assert_eq!(
            store.place_order("u1", Some("ANYCODE1")),
            Err(StoreError::DiscountNotEligible { nth: 5 })
        );
        // Nothing was mutated
        assert_eq!(store.order_count(), 0);
        assert!(!store.get_cart("u1").is_empty());
    }

    #[test]
    fn test_checkout_with_bogus_code_when_eligible() {
        let mut store = store_every_order_eligible();
        store.generate_discount_code().unwrap();
        store.add_to_cart("u1", 1, 1).unwrap();

        assert_eq!(
            store.place_order("u1", Some("BOGUS123")),
            Err(StoreError::InvalidDiscountCode)
        );
    }

    #[test]
    fn test_eligibility_tracks_ledger_length() {
        let mut store = Store::new(StoreConfig {
            nth_order_for_discount: 3,
            discount_pct: 10,
        });

        assert!(!store.eligible_now()); // next order is the 1st
        for _ in 0..2 {
            store.add_to_cart("u1", 1, 1).unwrap();
            store.place_order("u1", None).unwrap();
        }
        assert!(store.eligible_now()); // next order is the 3rd
    }

    #[test]
    fn test_generate_gates() {
        let mut store = store(); // nth = 5
        assert_eq!(
            store.generate_discount_code(),
            Err(StoreError::NotEligibleYet { nth: 5 })
        );

        let mut store = store_every_order_eligible();
        store.generate_discount_code().unwrap();
        assert_eq!(
            store.generate_discount_code(),
            Err(StoreError::ActiveCodeExists)
        );
    }

    #[test]
    fn test_oversized_quantity_never_reaches_the_money_math() {
        let mut store = store();

        // Large enough that price * quantity would overflow i64 cents
        assert_eq!(
            store.add_to_cart("u1", 1, 200_000_000_000_000),
            Err(StoreError::QuantityTooLarge {
                max: crate::cart::MAX_QUANTITY
            })
        );

        // The rejected add stored nothing: view and checkout stay total
        let view = store.cart_view("u1");
        assert!(view.items.is_empty());
        assert_eq!(store.place_order("u1", None), Err(StoreError::EmptyCart));
    }

    #[test]
    fn test_vanished_product_is_skipped_at_checkout() {
        // Catalog with a single product; the cart references it, then we
        // rebuild the store state around a catalog that lost the product.
        let catalog = Catalog::new([
            Product::new(1, "Almonds 500g", Money::from_major(750)),
            Product::new(9, "Discontinued", Money::from_major(100)),
        ]);
        let mut store = Store::with_catalog(StoreConfig::default(), catalog);
        store.add_to_cart("u1", 1, 2).unwrap();
        store.add_to_cart("u1", 9, 1).unwrap();

        // Simulate removal by swapping in a catalog without product 9
        store.catalog = Catalog::new([Product::new(1, "Almonds 500g", Money::from_major(750))]);

        let view = store.cart_view("u1");
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.total.to_string(), "1500.00");

        let order = store.place_order("u1", None).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.subtotal.to_string(), "1500.00");
    }

    #[test]
    fn test_stats_after_discounted_order() {
        let mut store = store_every_order_eligible();
        let code = store.generate_discount_code().unwrap();

        store.add_to_cart("u1", 2, 2).unwrap();
        let order = store.place_order("u1", Some(&code.code)).unwrap();

        let stats = store.stats();
        assert_eq!(stats.items_purchased, 2);
        assert_eq!(stats.gross_amount.to_string(), "700.00");
        assert_eq!(stats.total_discount_amount.to_string(), "70.00");
        assert_eq!(stats.net_amount.to_string(), "630.00");
        assert_eq!(stats.discount_codes.len(), 1);
        assert!(stats.discount_codes[0].used);
        assert_eq!(stats.discount_codes[0].redeemed_order_id, Some(order.id));
    }
}
