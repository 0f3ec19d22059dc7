//! Shared application state.
//!
//! ## Concurrency Model
//! The store is wrapped in a single `std::sync::Mutex`:
//! - axum handles requests concurrently, so the shared store needs a
//!   mutual-exclusion boundary
//! - no store operation does I/O or awaits, so the lock is held only for
//!   short synchronous sections and a std mutex (not tokio's) is the right
//!   tool
//!
//! This serializes store access exactly like the original single-worker
//! deployment did implicitly, without changing observable behavior.

use std::sync::{Arc, Mutex, MutexGuard};

use nutshop_core::{Store, StoreConfig};

use crate::config::ApiConfig;

/// Process-wide shared state handed to every handler.
pub struct AppState {
    store: Mutex<Store>,
    pub config: ApiConfig,
}

/// What handlers actually receive.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Builds the state (and the store inside it) from configuration.
    pub fn new(config: ApiConfig) -> SharedState {
        let store = Store::new(StoreConfig {
            nth_order_for_discount: config.nth_order_for_discount,
            discount_pct: config.discount_pct,
        });
        Arc::new(AppState {
            store: Mutex::new(store),
            config,
        })
    }

    /// Locks the store for the duration of one handler's critical section.
    ///
    /// A poisoned mutex means a previous handler panicked mid-operation; the
    /// store may hold partial state, so propagating the panic is the honest
    /// option for a demo without recovery logic.
    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().expect("store mutex poisoned")
    }
}
