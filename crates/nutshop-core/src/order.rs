//! # Order Types
//!
//! Immutable order records. An order is a *snapshot*: product names and
//! prices are copied out of the catalog at checkout time, so later catalog
//! changes never alter what a customer was charged.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::money::Money;

/// One line of an order, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub product_id: u32,
    /// Product name at time of checkout (frozen).
    pub name: String,
    /// Unit price at time of checkout (frozen).
    pub price: Money,
    pub quantity: i64,
    /// price x quantity, exact in cents.
    pub line_total: Money,
}

/// A placed order. Append-only: once in the ledger it is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    /// Sequential id starting at 1, assigned at append time.
    pub id: u64,
    pub user_id: String,
    /// Line items in ascending product-id order.
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub created_at: DateTime<Utc>,
    /// The code that funded the discount, omitted when none was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
}

impl Order {
    /// Total number of units across all line items.
    pub fn items_purchased(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
