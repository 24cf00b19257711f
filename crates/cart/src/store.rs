//! The cart store handle.

use catalog::{CatalogLookup, StockOracle};
use common::ProductId;
use storage::{KeyValueStore, StorageError, load_snapshot, save_snapshot};

use crate::{Cart, CartError, CartItem, CartOutcome, FailureCause, IgnoredReason, SetItemAmount};

/// Default namespaced key of the persisted cart snapshot.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Owns the in-memory cart and mirrors it to a key-value slot.
///
/// Mutating operations take `&mut self`, so the owner decides how calls are
/// serialized. Stock is checked, then the cart is mutated; nothing reserves
/// stock between the two steps, so a concurrent buyer can still take the
/// last unit after the check passed.
pub struct CartStore<K, S, C> {
    cart: Cart,
    storage: K,
    stock: S,
    catalog: C,
    key: String,
}

impl<K, S, C> CartStore<K, S, C>
where
    K: KeyValueStore,
    S: StockOracle,
    C: CatalogLookup,
{
    /// Restores the cart from the default slot, or starts empty.
    pub fn open(storage: K, stock: S, catalog: C) -> Result<Self, StorageError> {
        Self::open_with_key(storage, stock, catalog, CART_STORAGE_KEY)
    }

    /// Restores the cart from the slot under `key`, or starts empty.
    ///
    /// Fails if the slot holds something that is not a valid cart.
    pub fn open_with_key(
        storage: K,
        stock: S,
        catalog: C,
        key: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let key = key.into();
        let cart: Cart = load_snapshot(&storage, &key)?.unwrap_or_default();
        tracing::info!(%key, items = cart.len(), "cart restored");

        Ok(Self {
            cart,
            storage,
            stock,
            catalog,
            key,
        })
    }

    /// Returns the current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Returns the key of the persisted snapshot.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Adds one unit of a product.
    ///
    /// A product already in the cart is incremented if stock allows; a new
    /// product is fetched from the catalog and appended with amount 1. A
    /// product the catalog does not know is ignored.
    #[tracing::instrument(skip(self))]
    pub async fn add_item(&mut self, product_id: ProductId) -> Result<CartOutcome, CartError> {
        let result = self.try_add_item(product_id).await;
        record("add_item", &result);
        result
    }

    /// Removes the line for a product.
    #[tracing::instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<CartOutcome, CartError> {
        let result = self.try_remove_item(product_id);
        record("remove_item", &result);
        result
    }

    /// Sets the amount of a product already in the cart.
    ///
    /// Amounts `<= 0` are ignored; removal goes through [`Self::remove_item`].
    #[tracing::instrument(skip(self))]
    pub async fn set_item_amount(
        &mut self,
        cmd: SetItemAmount,
    ) -> Result<CartOutcome, CartError> {
        let result = self.try_set_item_amount(cmd).await;
        record("set_item_amount", &result);
        result
    }

    async fn try_add_item(&mut self, product_id: ProductId) -> Result<CartOutcome, CartError> {
        let fail = |source: FailureCause| CartError::AddFailed { product_id, source };

        let level = self
            .stock
            .stock(product_id)
            .await
            .map_err(|e| fail(e.into()))?;

        if let Some(current) = self.cart.get(product_id).map(|item| item.amount) {
            if current >= level.amount {
                return Err(CartError::StockExceeded {
                    product_id,
                    requested: u64::from(current) + 1,
                    available: level.amount,
                });
            }

            let amount = current + 1;
            let next = self.cart.with_amount(product_id, amount);
            self.commit(next).map_err(|e| fail(e.into()))?;
            return Ok(CartOutcome::AmountChanged { product_id, amount });
        }

        let Some(product) = self
            .catalog
            .product(product_id)
            .await
            .map_err(|e| fail(e.into()))?
        else {
            tracing::debug!("product not in catalog, nothing added");
            return Ok(CartOutcome::Ignored(IgnoredReason::NotInCatalog));
        };

        let item = CartItem {
            id: product_id,
            ..CartItem::from_product(product)
        };
        let next = self.cart.with_item(item.clone());
        self.commit(next).map_err(|e| fail(e.into()))?;
        Ok(CartOutcome::Added(item))
    }

    fn try_remove_item(&mut self, product_id: ProductId) -> Result<CartOutcome, CartError> {
        let fail = |source: FailureCause| CartError::RemoveFailed { product_id, source };

        let Some(removed) = self.cart.get(product_id).cloned() else {
            return Err(fail(FailureCause::NotInCart));
        };

        let next = self.cart.without(product_id);
        self.commit(next).map_err(|e| fail(e.into()))?;
        Ok(CartOutcome::Removed(removed))
    }

    async fn try_set_item_amount(&mut self, cmd: SetItemAmount) -> Result<CartOutcome, CartError> {
        let product_id = cmd.product_id;
        let fail = |source: FailureCause| CartError::UpdateAmountFailed { product_id, source };

        if cmd.amount <= 0 {
            return Ok(CartOutcome::Ignored(IgnoredReason::NonPositiveAmount));
        }

        let level = self
            .stock
            .stock(product_id)
            .await
            .map_err(|e| fail(e.into()))?;

        let requested = cmd.amount.unsigned_abs();
        let amount = match u32::try_from(requested) {
            Ok(amount) if amount <= level.amount => amount,
            _ => {
                return Err(CartError::StockExceeded {
                    product_id,
                    requested,
                    available: level.amount,
                });
            }
        };

        if !self.cart.contains(product_id) {
            tracing::warn!("amount set for a product that is not in the cart");
            return Ok(CartOutcome::Ignored(IgnoredReason::NotInCart));
        }

        let next = self.cart.with_amount(product_id, amount);
        self.commit(next).map_err(|e| fail(e.into()))?;
        Ok(CartOutcome::AmountChanged { product_id, amount })
    }

    /// Writes `next` to the snapshot slot, then makes it the current cart.
    fn commit(&mut self, next: Cart) -> Result<(), StorageError> {
        save_snapshot(&self.storage, &self.key, &next)?;
        self.cart = next;
        metrics::gauge!("cart_items").set(self.cart.len() as f64);
        Ok(())
    }
}

fn record(operation: &'static str, result: &Result<CartOutcome, CartError>) {
    let outcome = match result {
        Ok(outcome) => outcome.label(),
        Err(err) => err.label(),
    };
    metrics::counter!("cart_operations_total", "operation" => operation, "outcome" => outcome)
        .increment(1);

    match result {
        Ok(CartOutcome::Ignored(reason)) => {
            tracing::debug!(operation, %reason, "cart unchanged");
        }
        Ok(_) => tracing::info!(operation, outcome, "cart updated"),
        Err(err) => tracing::warn!(operation, error = %err, "cart operation failed"),
    }
}
