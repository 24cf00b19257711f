//! REST client for the storefront stock and product endpoints.

use async_trait::async_trait;
use common::ProductId;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{CatalogError, CatalogLookup, Product, Result, StockLevel, StockOracle};

/// Client for `GET {base}/stock/{id}` and `GET {base}/products/{id}`.
///
/// No timeout or retry is applied; a failed request is returned to the caller.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

/// Product body as served by the catalog. A missing product may come back
/// as `{}`, so every field is optional until `id` has been checked.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: Option<ProductId>,
    title: Option<String>,
    price: Option<f64>,
    image: Option<String>,
}

impl ProductRecord {
    fn into_product(self) -> Result<Option<Product>> {
        let Some(id) = self.id else {
            return Ok(None);
        };
        let missing = |field| CatalogError::IncompleteProduct {
            product_id: id,
            field,
        };

        Ok(Some(Product {
            id,
            title: self.title.ok_or_else(|| missing("title"))?,
            price: self.price.ok_or_else(|| missing("price"))?,
            image: self.image.ok_or_else(|| missing("image"))?,
        }))
    }
}

impl HttpCatalogClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Returns the API base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, resource: &str, product_id: ProductId) -> String {
        format!("{}/{}/{}", self.base_url, resource, product_id)
    }
}

#[async_trait]
impl StockOracle for HttpCatalogClient {
    #[tracing::instrument(skip(self))]
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel> {
        let url = self.url("stock", product_id);
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(CatalogError::Status {
                url,
                status: resp.status().as_u16(),
            });
        }

        let body = resp.bytes().await?;
        let level: StockLevel = serde_json::from_slice(&body)?;
        tracing::debug!(available = level.amount, "stock fetched");
        Ok(level)
    }
}

#[async_trait]
impl CatalogLookup for HttpCatalogClient {
    #[tracing::instrument(skip(self))]
    async fn product(&self, product_id: ProductId) -> Result<Option<Product>> {
        let url = self.url("products", product_id);
        let resp = self.client.get(&url).send().await?;

        match resp.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!("product not in catalog");
                return Ok(None);
            }
            status if !status.is_success() => {
                return Err(CatalogError::Status {
                    url,
                    status: status.as_u16(),
                });
            }
            _ => {}
        }

        let body = resp.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let record: ProductRecord = serde_json::from_slice(&body)?;
        record.into_product()
    }
}
