//! Cart error types.

use catalog::CatalogError;
use common::ProductId;
use storage::StorageError;
use thiserror::Error;

/// Errors reported by cart operations.
///
/// Every variant leaves the cart and its persisted snapshot unchanged.
#[derive(Debug, Error)]
pub enum CartError {
    /// More units were requested than the stock service reports available.
    #[error(
        "Requested quantity exceeds stock for product {product_id}: requested {requested}, available {available}"
    )]
    StockExceeded {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// Adding the product failed.
    #[error("Failed to add product {product_id}: {source}")]
    AddFailed {
        product_id: ProductId,
        #[source]
        source: FailureCause,
    },

    /// Removing the product failed.
    #[error("Failed to remove product {product_id}: {source}")]
    RemoveFailed {
        product_id: ProductId,
        #[source]
        source: FailureCause,
    },

    /// Updating the product amount failed.
    #[error("Failed to update amount of product {product_id}: {source}")]
    UpdateAmountFailed {
        product_id: ProductId,
        #[source]
        source: FailureCause,
    },
}

/// Underlying reason of a failed cart operation.
#[derive(Debug, Error)]
pub enum FailureCause {
    /// The product is not in the cart.
    #[error("product is not in the cart")]
    NotInCart,

    /// The stock or catalog lookup failed.
    #[error("lookup failed: {0}")]
    Lookup(#[from] CatalogError),

    /// Writing the snapshot failed.
    #[error("persistence failed: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// Returns the product the failed operation targeted.
    pub fn product_id(&self) -> ProductId {
        match self {
            CartError::StockExceeded { product_id, .. }
            | CartError::AddFailed { product_id, .. }
            | CartError::RemoveFailed { product_id, .. }
            | CartError::UpdateAmountFailed { product_id, .. } => *product_id,
        }
    }

    /// Returns the underlying cause, if the error has one.
    pub fn cause(&self) -> Option<&FailureCause> {
        match self {
            CartError::StockExceeded { .. } => None,
            CartError::AddFailed { source, .. }
            | CartError::RemoveFailed { source, .. }
            | CartError::UpdateAmountFailed { source, .. } => Some(source),
        }
    }

    /// Short message suitable for a transient notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            CartError::StockExceeded { .. } => "Requested quantity is out of stock",
            CartError::AddFailed { .. } => "Failed to add product",
            CartError::RemoveFailed { .. } => "Failed to remove product",
            CartError::UpdateAmountFailed { .. } => "Failed to update product amount",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            CartError::StockExceeded { .. } => "stock_exceeded",
            CartError::AddFailed { .. } => "add_failed",
            CartError::RemoveFailed { .. } => "remove_failed",
            CartError::UpdateAmountFailed { .. } => "update_amount_failed",
        }
    }
}
