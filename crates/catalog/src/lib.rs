//! Clients for the storefront's stock and product catalog.
//!
//! Two read-only collaborators back the cart:
//! - [`StockOracle`] reports how many units of a product are available.
//! - [`CatalogLookup`] returns the display metadata of a product.
//!
//! [`HttpCatalogClient`] talks to the storefront REST API and implements both;
//! [`InMemoryCatalog`] is a configurable fake for tests.

pub mod error;
pub mod http;
pub mod memory;
pub mod model;
pub mod service;

pub use common::ProductId;
pub use error::{CatalogError, Result};
pub use http::HttpCatalogClient;
pub use memory::InMemoryCatalog;
pub use model::{Product, StockLevel};
pub use service::{CatalogLookup, StockOracle};
