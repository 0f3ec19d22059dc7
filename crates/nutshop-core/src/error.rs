//! # Error Types
//!
//! Domain-specific error types for nutshop-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, threshold, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to a user-facing detail message; the API layer turns
//!    all of them into deterministic 400 rejections with no partial mutation

use thiserror::Error;

/// Store business logic errors.
///
/// Every variant is a deterministic rejection of the current request: the
/// store validates before mutating, so a returned error means nothing
/// changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The product id does not exist in the catalog.
    ///
    /// Surfaced as 400 (not 404): the id arrives in a request body, so the
    /// resource addressed by the URL exists, the input is what's wrong.
    #[error("Unknown product_id: {product_id}")]
    UnknownProduct { product_id: u32 },

    /// A cart add was attempted with a non-positive quantity.
    #[error("Quantity must be positive")]
    InvalidQuantity { quantity: i64 },

    /// A quantity (per request or accumulated) exceeded the per-item cap.
    ///
    /// The cap keeps every line total and subtotal inside exact i64 cents
    /// arithmetic; without it a single oversized quantity could overflow.
    #[error("Quantity must not exceed {max}")]
    QuantityTooLarge { max: i64 },

    /// Checkout was attempted on a cart with no entries.
    #[error("Cart is empty")]
    EmptyCart,

    /// A discount was requested but the next order is not the nth.
    #[error("Discount not available. A code is valid only for every {nth}th order")]
    DiscountNotEligible { nth: u64 },

    /// Code generation was attempted before the next order is the nth.
    ///
    /// Worded for the admin: the checkout-side `DiscountNotEligible` speaks
    /// to the buyer, this one to the operator minting codes.
    #[error("Not eligible yet. A code is available only for every {nth}th order")]
    NotEligibleYet { nth: u64 },

    /// The supplied code does not match the active one, or was consumed.
    #[error("Invalid or unavailable discount code")]
    InvalidDiscountCode,

    /// Code generation was attempted while a code is already active.
    #[error("An active discount code already exists")]
    ActiveCodeExists,
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
