//! # Product Catalog
//!
//! A fixed, read-only mapping of product id to product. The demo runs
//! against a tiny compiled-in catalog; there is no create/update/delete
//! surface, so products are immutable for the life of the process.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::money::Money;

/// A simple, sellable product.
///
/// Immutable once the catalog is built. The `price` here is the *current*
/// catalog price; orders snapshot it at checkout time, so later catalog
/// changes never retroactively affect a placed order.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: Money,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, price: Money) -> Self {
        Product {
            id,
            name: name.into(),
            price,
        }
    }
}

/// The product catalog. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    // BTreeMap keeps listings in stable id order
    products: BTreeMap<u32, Product>,
}

impl Catalog {
    /// Builds a catalog from an explicit product list (used by tests and by
    /// any future seeding mechanism).
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Catalog {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Looks up a product by id.
    pub fn get(&self, product_id: u32) -> Option<&Product> {
        self.products.get(&product_id)
    }

    /// Checks whether the id exists in the catalog.
    pub fn contains(&self, product_id: u32) -> bool {
        self.products.contains_key(&product_id)
    }

    /// All products in ascending id order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// The demo catalog: three products, whole-unit prices.
impl Default for Catalog {
    fn default() -> Self {
        Catalog::new([
            Product::new(1, "Almonds 500g", Money::from_major(750)),
            Product::new(2, "Cashews 500g", Money::from_major(350)),
            Product::new(3, "Pistachios 500g", Money::from_major(900)),
        ])
    }
}
