//! Shopping cart state store.
//!
//! This crate provides:
//! - `Cart` and `CartItem`, the ordered, id-unique list of line items
//! - `CartStore`, the handle that mutates the cart through three operations
//!   (add, remove, set amount) and mirrors it to a key-value slot
//! - `CartOutcome` and `CartError`, the explicit result of every operation
//!
//! Each operation reads the current cart, consults the stock or catalog
//! service where needed, persists the new cart and only then replaces the
//! in-memory copy.

pub mod cart;
pub mod command;
pub mod error;
pub mod outcome;
pub mod store;

pub use cart::{Cart, CartItem, InvalidCart};
pub use command::SetItemAmount;
pub use common::ProductId;
pub use error::{CartError, FailureCause};
pub use outcome::{CartOutcome, IgnoredReason};
pub use store::{CART_STORAGE_KEY, CartStore};
