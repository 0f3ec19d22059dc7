//! HTTP routes and handlers.
//!
//! ## Surface
//! ```text
//! GET    /products/                  public catalog
//! GET    /cart/                      current user's cart + total
//! POST   /cart/items/                add (increments quantity)       201
//! PUT    /cart/items/{id}/           set exact quantity (<=0 removes)
//! DELETE /cart/items/{id}/           remove item (idempotent)        204
//! POST   /checkout/                  cart -> order                   201
//! POST   /admin/generate-discount/   mint a code (admin)             201
//! GET    /admin/stats/               aggregates (admin)
//! GET    /health/                    liveness
//! ```
//!
//! Handlers stay thin: parse input, lock the store, map the result. All
//! business rules live in nutshop-core.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use nutshop_core::{CartView, Order, Product, StoreStats};

use crate::auth::{require_admin, user_id};
use crate::error::ApiError;
use crate::state::SharedState;

/// Builds the application router.
pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/products/", get(list_products))
        .route("/cart/", get(get_cart))
        .route("/cart/items/", post(add_cart_item))
        .route(
            "/cart/items/:product_id/",
            put(set_cart_item).delete(remove_cart_item),
        )
        .route("/checkout/", post(checkout))
        .route("/admin/generate-discount/", post(generate_discount))
        .route("/admin/stats/", get(admin_stats))
        .route("/health/", get(health))
        .with_state(state)
}

// Public endpoints -----------------------------------------------------------

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_products(State(state): State<SharedState>) -> Json<Vec<Product>> {
    let store = state.store();
    Json(store.catalog().products().cloned().collect())
}

async fn get_cart(State(state): State<SharedState>, headers: HeaderMap) -> Json<CartView> {
    let user = user_id(&headers).to_string();
    let mut store = state.store();
    Json(store.cart_view(&user))
}

async fn add_cart_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let product_id = require_product_id(&body)?;
    let quantity = require_int(&body, "quantity")?;

    let user = user_id(&headers).to_string();
    state.store().add_to_cart(&user, product_id, quantity)?;

    tracing::info!(user = %user, product_id, quantity, "cart item added");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "detail": "Item added to cart." })),
    ))
}

async fn set_cart_item(
    State(state): State<SharedState>,
    Path(product_id): Path<u32>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let quantity = require_int(&body, "quantity")?;

    let user = user_id(&headers).to_string();
    state.store().set_cart_item(&user, product_id, quantity)?;

    Ok(Json(json!({ "detail": "Cart updated." })))
}

async fn remove_cart_item(
    State(state): State<SharedState>,
    Path(product_id): Path<u32>,
    headers: HeaderMap,
) -> StatusCode {
    let user = user_id(&headers).to_string();
    state.store().remove_cart_item(&user, product_id);
    StatusCode::NO_CONTENT
}

#[derive(Debug, Default, Deserialize)]
struct CheckoutRequest {
    #[serde(default)]
    discount_code: Option<String>,
}

async fn checkout(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Option<Json<CheckoutRequest>>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    // An empty string means "no code"
    let code = request
        .discount_code
        .as_deref()
        .filter(|code| !code.is_empty());

    let user = user_id(&headers).to_string();
    let order = state.store().place_order(&user, code)?;

    tracing::info!(
        user = %user,
        order_id = order.id,
        total = %order.total,
        discounted = order.discount_code.is_some(),
        "order placed"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

// Admin endpoints ------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateDiscountResponse {
    code: String,
    discount_pct: u32,
    created_at: DateTime<Utc>,
    note: &'static str,
}

async fn generate_discount(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<GenerateDiscountResponse>), ApiError> {
    require_admin(&headers, &state.config.admin_api_key)?;

    let code = state.store().generate_discount_code()?;
    tracing::info!(code = %code.code, pct = code.discount_pct, "discount code generated");

    Ok((
        StatusCode::CREATED,
        Json(GenerateDiscountResponse {
            code: code.code,
            discount_pct: code.discount_pct,
            created_at: code.created_at,
            note: "Share this code with users. It will be valid for the next \
                   eligible (nth) order and is single-use.",
        }),
    ))
}

async fn admin_stats(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<StoreStats>, ApiError> {
    require_admin(&headers, &state.config.admin_api_key)?;
    Ok(Json(state.store().stats()))
}

// Body helpers ---------------------------------------------------------------

/// Pulls a required integer field out of a JSON body, producing 400s whose
/// detail message names the offending field.
fn require_int(body: &Value, field: &str) -> Result<i64, ApiError> {
    let value = body
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ApiError::BadRequest(format!("{field} is required.")))?;
    value
        .as_i64()
        .ok_or_else(|| ApiError::BadRequest(format!("{field} must be an integer.")))
}

/// `product_id` additionally has to fit the catalog's id type.
fn require_product_id(body: &Value) -> Result<u32, ApiError> {
    let raw = require_int(body, "product_id")?;
    u32::try_from(raw).map_err(|_| ApiError::BadRequest(format!("Unknown product_id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_int() {
        let body = json!({ "quantity": 3 });
        assert_eq!(require_int(&body, "quantity").unwrap(), 3);

        let missing = require_int(&json!({}), "quantity").unwrap_err();
        assert_eq!(missing.to_string(), "quantity is required.");

        let not_int = require_int(&json!({ "quantity": "two" }), "quantity").unwrap_err();
        assert_eq!(not_int.to_string(), "quantity must be an integer.");

        let null = require_int(&json!({ "quantity": null }), "quantity").unwrap_err();
        assert_eq!(null.to_string(), "quantity is required.");
    }

    #[test]
    fn test_require_product_id_bounds() {
        assert_eq!(require_product_id(&json!({ "product_id": 1 })).unwrap(), 1);
        assert!(require_product_id(&json!({ "product_id": -1 })).is_err());
    }
}
