//! Cart read and mutation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use cart::{Cart, CartItem, CartOutcome, CartStore, ProductId, SetItemAmount};
use catalog::{CatalogLookup, StockOracle};
use serde::{Deserialize, Serialize};
use storage::KeyValueStore;
use tokio::sync::Mutex;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
///
/// The store sits behind an async mutex, so cart operations run one at a time.
pub struct AppState<K, S, C> {
    pub store: Mutex<CartStore<K, S, C>>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: u64,
}

#[derive(Deserialize)]
pub struct SetAmountRequest {
    pub amount: i64,
}

// -- Response types --

#[derive(Serialize)]
pub struct CartItemResponse {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
    pub subtotal: f64,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub item_count: usize,
    pub unit_count: u64,
    pub total: f64,
}

#[derive(Serialize)]
pub struct OperationResponse {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub cart: CartResponse,
}

impl From<&CartItem> for CartItemResponse {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.get(),
            title: item.title.clone(),
            price: item.price,
            image: item.image.clone(),
            amount: item.amount,
            subtotal: item.subtotal(),
        }
    }
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.iter().map(CartItemResponse::from).collect(),
            item_count: cart.len(),
            unit_count: cart.unit_count(),
            total: cart.total(),
        }
    }
}

impl OperationResponse {
    fn new(outcome: &CartOutcome, cart: &Cart) -> Self {
        let (label, reason) = match outcome {
            CartOutcome::Added(_) => ("added", None),
            CartOutcome::AmountChanged { .. } => ("amount_changed", None),
            CartOutcome::Removed(_) => ("removed", None),
            CartOutcome::Ignored(reason) => ("ignored", Some(reason.to_string())),
        };
        Self {
            outcome: label,
            reason,
            cart: CartResponse::from(cart),
        }
    }
}

// -- Handlers --

/// GET /cart — current cart with totals.
pub async fn get<K, S, C>(State(state): State<Arc<AppState<K, S, C>>>) -> Json<CartResponse>
where
    K: KeyValueStore + 'static,
    S: StockOracle + 'static,
    C: CatalogLookup + 'static,
{
    let store = state.store.lock().await;
    Json(CartResponse::from(store.cart()))
}

/// POST /cart/items — add one unit of a product.
#[tracing::instrument(skip(state, req), fields(product_id = req.product_id))]
pub async fn add_item<K, S, C>(
    State(state): State<Arc<AppState<K, S, C>>>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<OperationResponse>, ApiError>
where
    K: KeyValueStore + 'static,
    S: StockOracle + 'static,
    C: CatalogLookup + 'static,
{
    let mut store = state.store.lock().await;
    let outcome = store.add_item(ProductId::new(req.product_id)).await?;
    Ok(Json(OperationResponse::new(&outcome, store.cart())))
}

/// PUT /cart/items/:id — set the amount of a product in the cart.
#[tracing::instrument(skip(state, req))]
pub async fn set_amount<K, S, C>(
    State(state): State<Arc<AppState<K, S, C>>>,
    Path(id): Path<String>,
    Json(req): Json<SetAmountRequest>,
) -> Result<Json<OperationResponse>, ApiError>
where
    K: KeyValueStore + 'static,
    S: StockOracle + 'static,
    C: CatalogLookup + 'static,
{
    let product_id = parse_product_id(&id)?;
    let mut store = state.store.lock().await;
    let outcome = store
        .set_item_amount(SetItemAmount::new(product_id, req.amount))
        .await?;
    Ok(Json(OperationResponse::new(&outcome, store.cart())))
}

/// DELETE /cart/items/:id — remove a product from the cart.
#[tracing::instrument(skip(state))]
pub async fn remove_item<K, S, C>(
    State(state): State<Arc<AppState<K, S, C>>>,
    Path(id): Path<String>,
) -> Result<Json<OperationResponse>, ApiError>
where
    K: KeyValueStore + 'static,
    S: StockOracle + 'static,
    C: CatalogLookup + 'static,
{
    let product_id = parse_product_id(&id)?;
    let mut store = state.store.lock().await;
    let outcome = store.remove_item(product_id)?;
    Ok(Json(OperationResponse::new(&outcome, store.cart())))
}

fn parse_product_id(id: &str) -> Result<ProductId, ApiError> {
    id.parse::<ProductId>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}
