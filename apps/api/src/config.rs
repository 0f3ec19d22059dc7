//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults.

use std::env;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// TCP port to listen on
    pub port: u16,

    /// Host/interface to bind
    pub bind_host: String,

    /// Value the X-Admin-Key header must match on admin endpoints
    pub admin_api_key: String,

    /// Every nth order is eligible for a discount code
    pub nth_order_for_discount: u64,

    /// Flat percentage a discount code takes off the subtotal
    pub discount_pct: u32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            bind_host: env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            admin_api_key: env::var("ADMIN_API_KEY").unwrap_or_else(|_| {
                // Development default; production deployments MUST set the
                // environment variable
                "dev-admin-key".to_string()
            }),

            nth_order_for_discount: env::var("NTH_ORDER_FOR_DISCOUNT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("NTH_ORDER_FOR_DISCOUNT".to_string()))?,

            discount_pct: env::var("DISCOUNT_PCT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DISCOUNT_PCT".to_string()))?,
        };

        if config.nth_order_for_discount == 0 {
            return Err(ConfigError::InvalidValue(
                "NTH_ORDER_FOR_DISCOUNT".to_string(),
            ));
        }
        if config.discount_pct == 0 || config.discount_pct > 100 {
            return Err(ConfigError::InvalidValue("DISCOUNT_PCT".to_string()));
        }

        Ok(config)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 8000,
            bind_host: "0.0.0.0".to_string(),
            admin_api_key: "dev-admin-key".to_string(),
            nth_order_for_discount: 5,
            discount_pct: 10,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
