//! HTTP service exposing the shopping cart store.
//!
//! The service owns a single `CartStore` and serves it over REST, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use cart::CartStore;
use catalog::{CatalogLookup, StockOracle};
use metrics_exporter_prometheus::PrometheusHandle;
use storage::{KeyValueStore, StorageError};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::cart::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<K, S, C>(state: Arc<AppState<K, S, C>>, metrics_handle: PrometheusHandle) -> Router
where
    K: KeyValueStore + 'static,
    S: StockOracle + 'static,
    C: CatalogLookup + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/cart", get(routes::cart::get::<K, S, C>))
        .route("/cart/items", post(routes::cart::add_item::<K, S, C>))
        .route(
            "/cart/items/{id}",
            put(routes::cart::set_amount::<K, S, C>).delete(routes::cart::remove_item::<K, S, C>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Restores the cart from `storage` and wraps it in shared application state.
pub fn create_state<K, S, C>(
    storage: K,
    stock: S,
    catalog: C,
    storage_key: &str,
) -> Result<Arc<AppState<K, S, C>>, StorageError>
where
    K: KeyValueStore,
    S: StockOracle,
    C: CatalogLookup,
{
    let store = CartStore::open_with_key(storage, stock, catalog, storage_key)?;
    Ok(Arc::new(AppState {
        store: Mutex::new(store),
    }))
}
