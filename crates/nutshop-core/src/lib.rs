//! # nutshop-core: Pure Business Logic for Nutshop
//!
//! This crate is the heart of the demo shop. It owns every piece of mutable
//! state (catalog, carts, order ledger, discount codes) and all the money
//! arithmetic, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Nutshop Architecture                        │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐ │
//! │  │                  apps/api (axum HTTP)                     │ │
//! │  │   routing, JSON shapes, headers, status codes             │ │
//! │  └────────────────────────────┬──────────────────────────────┘ │
//! │                               │                                 │
//! │  ┌────────────────────────────▼──────────────────────────────┐ │
//! │  │              ★ nutshop-core (THIS CRATE) ★                │ │
//! │  │                                                           │ │
//! │  │  ┌────────┐ ┌───────┐ ┌──────┐ ┌──────────┐ ┌─────────┐ │ │
//! │  │  │ money  │ │catalog│ │ cart │ │ discount │ │  order  │ │ │
//! │  │  └────────┘ └───────┘ └──────┘ └──────────┘ └─────────┘ │ │
//! │  │        ┌───────┐              ┌───────┐                  │ │
//! │  │        │ store │              │ stats │                  │ │
//! │  │        └───────┘              └───────┘                  │ │
//! │  │                                                           │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                      │ │
//! │  └───────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Integer Money**: all monetary values are exact cents (i64), with a
//!    single half-up rounding boundary at the percentage discount
//! 2. **Explicit Errors**: all failures are typed [`StoreError`] variants
//! 3. **Validate, then mutate**: every operation either fully commits or
//!    leaves the store untouched
//! 4. **No globals**: a [`Store`] is constructed and passed around; tests
//!    build a fresh one each

pub mod cart;
pub mod catalog;
pub mod discount;
pub mod error;
pub mod money;
pub mod order;
pub mod stats;
pub mod store;

pub use catalog::{Catalog, Product};
pub use discount::{DiscountCode, DiscountEngine};
pub use error::{StoreError, StoreResult};
pub use money::Money;
pub use order::{Order, OrderItem};
pub use stats::StoreStats;
pub use store::{CartLine, CartView, Store, StoreConfig};
