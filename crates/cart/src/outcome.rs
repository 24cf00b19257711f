//! Explicit results of cart operations.

use common::ProductId;

use crate::CartItem;

/// What a successful cart operation did.
#[derive(Debug, Clone, PartialEq)]
pub enum CartOutcome {
    /// A new line was appended with amount 1.
    Added(CartItem),

    /// An existing line now has `amount` units.
    AmountChanged { product_id: ProductId, amount: u32 },

    /// The line was removed.
    Removed(CartItem),

    /// Nothing changed and nothing was persisted.
    Ignored(IgnoredReason),
}

/// Why an operation left the cart untouched without reporting an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The catalog has no product with this id.
    NotInCatalog,
    /// The requested amount was zero or negative.
    NonPositiveAmount,
    /// The amount targeted a product that is not in the cart.
    NotInCart,
}

impl CartOutcome {
    /// Returns true if the cart was modified and persisted.
    pub fn is_change(&self) -> bool {
        !matches!(self, CartOutcome::Ignored(_))
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            CartOutcome::Added(_) => "added",
            CartOutcome::AmountChanged { .. } => "amount_changed",
            CartOutcome::Removed(_) => "removed",
            CartOutcome::Ignored(_) => "ignored",
        }
    }
}

impl std::fmt::Display for IgnoredReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoredReason::NotInCatalog => write!(f, "product not found in catalog"),
            IgnoredReason::NonPositiveAmount => write!(f, "amount must be greater than 0"),
            IgnoredReason::NotInCart => write!(f, "product is not in the cart"),
        }
    }
}
