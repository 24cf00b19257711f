//! Cart commands.

use common::ProductId;

/// Command to set the quantity of a product already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetItemAmount {
    /// The product whose amount changes.
    pub product_id: ProductId,

    /// The requested amount. Values `<= 0` are ignored.
    pub amount: i64,
}

impl SetItemAmount {
    /// Creates a new SetItemAmount command.
    pub fn new(product_id: impl Into<ProductId>, amount: i64) -> Self {
        Self {
            product_id: product_id.into(),
            amount,
        }
    }
}
