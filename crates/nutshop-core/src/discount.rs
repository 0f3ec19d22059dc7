//! # Discount Engine
//!
//! Every-nth-order single-use discount codes.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Engine gate:   no-active-code ◄────────────► active-code       │
//! │                      generate() ──►                             │
//! │                                 ◄── consume()                   │
//! │                                                                 │
//! │  Per code:      unused ──► used          (terminal)             │
//! │                                                                 │
//! │  generate() is only legal when the NEXT order would be the nth  │
//! │  AND no code is currently active. consume() flips the code to   │
//! │  used and clears the active slot in the same step, so a code    │
//! │  can fund exactly one order.                                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::Rng;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

/// Characters a discount code is minted from: uppercase letters and digits.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated code.
const CODE_LENGTH: usize = 8;

/// Default discount percentage when none is configured.
pub const DEFAULT_DISCOUNT_PCT: u32 = 10;

/// Default eligibility threshold: every 5th order can carry a discount.
pub const DEFAULT_NTH_ORDER: u64 = 5;

/// A single-use discount code and its redemption state.
///
/// Mutated exactly once (unused -> used) at the moment it funds a checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountCode {
    pub code: String,
    pub discount_pct: u32,
    pub created_at: DateTime<Utc>,
    pub used: bool,
    pub redeemed_order_id: Option<u64>,
}

/// Tracks eligibility and the single active code.
#[derive(Debug)]
pub struct DiscountEngine {
    nth: u64,
    discount_pct: u32,
    /// The one code currently available for redemption, if any.
    active_code: Option<String>,
    /// Full history, including consumed codes (read by stats).
    codes: Vec<DiscountCode>,
}

impl DiscountEngine {
    /// Creates an engine granting `discount_pct`% off every `nth` order.
    ///
    /// `nth` is clamped to at least 1 so the modulo arithmetic stays sound.
    pub fn new(nth: u64, discount_pct: u32) -> Self {
        DiscountEngine {
            nth: nth.max(1),
            discount_pct,
            active_code: None,
            codes: Vec::new(),
        }
    }

    /// The configured eligibility threshold.
    pub fn nth(&self) -> u64 {
        self.nth
    }

    /// The configured discount percentage.
    pub fn discount_pct(&self) -> u32 {
        self.discount_pct
    }

    /// True iff the *next* order to be placed would be the nth.
    pub fn eligible(&self, order_count: u64) -> bool {
        (order_count + 1) % self.nth == 0
    }

    /// True iff a code is currently available for redemption.
    pub fn has_active_code(&self) -> bool {
        self.active_code.is_some()
    }

    /// All codes ever generated, oldest first.
    pub fn history(&self) -> &[DiscountCode] {
        &self.codes
    }

    /// Mints a new active code.
    ///
    /// Fails with `NotEligibleYet` when the next order is not the nth, and
    /// `ActiveCodeExists` when a code is already waiting to be redeemed.
    pub fn generate(&mut self, order_count: u64) -> StoreResult<DiscountCode> {
        if !self.eligible(order_count) {
            return Err(StoreError::NotEligibleYet { nth: self.nth });
        }
        if self.active_code.is_some() {
            return Err(StoreError::ActiveCodeExists);
        }

        let code = DiscountCode {
            code: mint_code(),
            discount_pct: self.discount_pct,
            created_at: Utc::now(),
            used: false,
            redeemed_order_id: None,
        };
        self.active_code = Some(code.code.clone());
        self.codes.push(code.clone());
        Ok(code)
    }

    /// Checks whether `code` can fund a checkout right now.
    ///
    /// True iff the code is non-empty, matches the active code, the next
    /// order is the nth, and the code has not been consumed. Callers that
    /// need a user-facing distinction between "not eligible" and "bad code"
    /// should consult [`eligible`](Self::eligible) after a `false` here.
    pub fn validate(&self, code: &str, order_count: u64) -> bool {
        if code.is_empty() || !self.eligible(order_count) {
            return false;
        }
        let Some(active) = self.active_code.as_deref() else {
            return false;
        };
        if active != code {
            return false;
        }
        self.codes
            .iter()
            .any(|c| c.code == code && !c.used)
    }

    /// Marks `code` as redeemed by `order_id` and clears the active slot.
    ///
    /// Called by the store immediately after the funded order is appended;
    /// from that point on the code can never validate again.
    pub fn consume(&mut self, code: &str, order_id: u64) {
        if let Some(entry) = self.codes.iter_mut().find(|c| c.code == code) {
            entry.used = true;
            entry.redeemed_order_id = Some(order_id);
        }
        if self.active_code.as_deref() == Some(code) {
            self.active_code = None;
        }
    }
}

impl Default for DiscountEngine {
    fn default() -> Self {
        DiscountEngine::new(DEFAULT_NTH_ORDER, DEFAULT_DISCOUNT_PCT)
    }
}

/// Mints an 8-character code from the OS CSPRNG.
///
/// `OsRng` pulls from the operating system's entropy source, so codes are
/// unpredictable to clients.
fn mint_code() -> String {
    let mut rng = OsRng;
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
