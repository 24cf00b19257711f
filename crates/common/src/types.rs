use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a catalog product.
///
/// Wraps the integer id used by the storefront catalog so product ids
/// cannot be mixed up with quantities or prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a product ID from its catalog number.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying catalog number.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for u64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Error returned when a path segment is not a valid product id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid product id: {0}")]
pub struct ParseProductIdError(#[source] ParseIntError);

impl FromStr for ProductId {
    type Err = ParseProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self).map_err(ParseProductIdError)
    }
}
