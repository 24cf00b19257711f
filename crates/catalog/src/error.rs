//! Catalog error types.

use common::ProductId;
use thiserror::Error;

/// Errors that can occur while querying stock or product data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be sent or the response body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The response body was not the expected JSON shape.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A product record carried an id but lacked a display field.
    #[error("Product {product_id} is missing field '{field}'")]
    IncompleteProduct {
        product_id: ProductId,
        field: &'static str,
    },

    /// No stock record exists for the product.
    #[error("No stock record for product {0}")]
    StockNotFound(ProductId),

    /// The service is unreachable or refused the request.
    #[error("Catalog service unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for catalog results.
pub type Result<T> = std::result::Result<T, CatalogError>;
