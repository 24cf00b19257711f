//! Catalog service traits.

use async_trait::async_trait;
use common::ProductId;

use crate::{Product, Result, StockLevel};

/// Reports current available quantity for a product.
#[async_trait]
pub trait StockOracle: Send + Sync {
    /// Returns the stock level of `product_id`.
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel>;
}

/// Fetches product display metadata.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Returns the product, or `None` if the catalog does not know it.
    async fn product(&self, product_id: ProductId) -> Result<Option<Product>>;
}
