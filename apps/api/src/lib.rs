//! # nutshop-api: HTTP layer for the Nutshop demo store
//!
//! Axum routing and serialization over [`nutshop_core`]. The binary in
//! `main.rs` assembles config, state and the router; integration tests drive
//! the same router in-process.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use routes::app;
pub use state::{AppState, SharedState};
