//! In-memory catalog for tests and local runs.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use common::ProductId;

use crate::{CatalogError, CatalogLookup, Product, Result, StockLevel, StockOracle};

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
    fail_on_stock: bool,
    fail_on_product: bool,
    stock_lookups: usize,
    product_lookups: usize,
}

/// In-memory stock oracle and catalog lookup.
///
/// Clones share state, so a test can change stock between cart operations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `product` to the catalog with `available` units in stock.
    pub fn with_product(self, product: Product, available: u32) -> Self {
        self.set_stock(product.id, available);
        self.insert_product(product);
        self
    }

    /// Inserts or replaces product metadata.
    pub fn insert_product(&self, product: Product) {
        self.write().products.insert(product.id, product);
    }

    /// Sets the available stock for a product.
    pub fn set_stock(&self, product_id: ProductId, available: u32) {
        self.write().stock.insert(product_id, available);
    }

    /// Makes every subsequent stock and product lookup fail until reset.
    pub fn set_fail_on_lookup(&self, fail: bool) {
        let mut state = self.write();
        state.fail_on_stock = fail;
        state.fail_on_product = fail;
    }

    /// Makes subsequent stock lookups fail until reset.
    pub fn set_fail_on_stock(&self, fail: bool) {
        self.write().fail_on_stock = fail;
    }

    /// Makes subsequent product lookups fail until reset.
    pub fn set_fail_on_product(&self, fail: bool) {
        self.write().fail_on_product = fail;
    }

    /// Returns how many stock lookups have been served.
    pub fn stock_lookups(&self) -> usize {
        self.read().stock_lookups
    }

    /// Returns how many product lookups have been served.
    pub fn product_lookups(&self) -> usize {
        self.read().product_lookups
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryCatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryCatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StockOracle for InMemoryCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel> {
        let mut state = self.write();
        state.stock_lookups += 1;

        if state.fail_on_stock {
            return Err(CatalogError::Unavailable("stock service down".to_string()));
        }

        state
            .stock
            .get(&product_id)
            .map(|&amount| StockLevel {
                id: product_id,
                amount,
            })
            .ok_or(CatalogError::StockNotFound(product_id))
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn product(&self, product_id: ProductId) -> Result<Option<Product>> {
        let mut state = self.write();
        state.product_lookups += 1;

        if state.fail_on_product {
            return Err(CatalogError::Unavailable("catalog service down".to_string()));
        }

        Ok(state.products.get(&product_id).cloned())
    }
}
