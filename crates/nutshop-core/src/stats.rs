//! # Stats Aggregator
//!
//! Pure read-side computation over the order ledger and discount history.
//! No caching: the ledger is process-local and modest in size, so every call
//! recomputes from scratch.

use serde::Serialize;

use crate::discount::DiscountCode;
use crate::money::Money;
use crate::order::Order;

/// Aggregate purchase figures plus the full discount-code history.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    /// Sum of all order-item quantities across all orders.
    pub items_purchased: i64,
    /// Sum of order subtotals (before discount).
    pub gross_amount: Money,
    /// Sum of discounts granted.
    pub total_discount_amount: Money,
    /// Sum of order totals (after discount).
    pub net_amount: Money,
    /// Every code ever generated, with its usage state.
    pub discount_codes: Vec<DiscountCode>,
}

impl StoreStats {
    /// Derives stats from the ledger and code history. Never mutates either.
    pub fn compute(orders: &[Order], codes: &[DiscountCode]) -> Self {
        StoreStats {
            items_purchased: orders.iter().map(Order::items_purchased).sum(),
            gross_amount: orders.iter().map(|o| o.subtotal).sum(),
            total_discount_amount: orders.iter().map(|o| o.discount).sum(),
            net_amount: orders.iter().map(|o| o.total).sum(),
            discount_codes: codes.to_vec(),
        }
    }
}
