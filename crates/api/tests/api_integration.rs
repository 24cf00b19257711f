//! Integration tests for the cart API server.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use cart::CART_STORAGE_KEY;
use catalog::{InMemoryCatalog, Product, ProductId};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use storage::{InMemoryStore, KeyValueStore};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_product(Product::new(1u64, "Running Shoe", 179.9, "https://example.com/1.jpg"), 3)
        .with_product(Product::new(5u64, "Shoe", 100.0, "x"), 2)
}

fn setup_with(storage: InMemoryStore, catalog: InMemoryCatalog) -> axum::Router {
    let state = api::create_state(storage, catalog.clone(), catalog, CART_STORAGE_KEY).unwrap();
    api::create_app(state, get_metrics_handle())
}

fn setup() -> (axum::Router, InMemoryStore) {
    let storage = InMemoryStore::new();
    (setup_with(storage.clone(), catalog()), storage)
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn add(product_id: u64) -> Request<Body> {
    json_request("POST", "/cart/items", json!({ "product_id": product_id }))
}

fn set_amount(product_id: u64, amount: i64) -> Request<Body> {
    json_request(
        "PUT",
        &format!("/cart/items/{product_id}"),
        json!({ "amount": amount }),
    )
}

fn remove(product_id: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/cart/items/{product_id}"))
        .body(Body::empty())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let (status, json) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_empty_cart() {
    let (app, _) = setup();

    let (status, json) = send(&app, get("/cart")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"], json!([]));
    assert_eq!(json["item_count"], 0);
    assert_eq!(json["total"], 0.0);
}

#[tokio::test]
async fn test_add_new_product() {
    let (app, storage) = setup();

    let (status, json) = send(&app, add(5)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "added");
    assert_eq!(
        json["cart"]["items"],
        json!([{
            "id": 5,
            "title": "Shoe",
            "price": 100.0,
            "image": "x",
            "amount": 1,
            "subtotal": 100.0
        }])
    );

    let persisted: Value =
        serde_json::from_str(&storage.get(CART_STORAGE_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(
        persisted,
        json!([{ "id": 5, "title": "Shoe", "price": 100.0, "image": "x", "amount": 1 }])
    );
}

#[tokio::test]
async fn test_add_twice_increments_then_hits_stock() {
    let (app, _) = setup();

    send(&app, add(5)).await;
    let (status, json) = send(&app, add(5)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "amount_changed");
    assert_eq!(json["cart"]["items"][0]["amount"], 2);
    assert_eq!(json["cart"]["total"], 200.0);

    let (status, json) = send(&app, add(5)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "Requested quantity is out of stock");

    let (_, cart) = send(&app, get("/cart")).await;
    assert_eq!(cart["items"][0]["amount"], 2);
}

#[tokio::test]
async fn test_add_unknown_product_is_ignored() {
    let catalog = catalog();
    catalog.set_stock(ProductId::new(77), 9);
    let app = setup_with(InMemoryStore::new(), catalog);

    let (status, json) = send(&app, add(77)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "ignored");
    assert_eq!(json["reason"], "product not found in catalog");
    assert_eq!(json["cart"]["item_count"], 0);
}

#[tokio::test]
async fn test_add_with_catalog_down_is_bad_gateway() {
    let catalog = catalog();
    catalog.set_fail_on_lookup(true);
    let app = setup_with(InMemoryStore::new(), catalog);

    let (status, json) = send(&app, add(1)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "Failed to add product");
}

#[tokio::test]
async fn test_set_amount() {
    let (app, _) = setup();
    send(&app, add(1)).await;

    let (status, json) = send(&app, set_amount(1, 3)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "amount_changed");
    assert_eq!(json["cart"]["unit_count"], 3);

    let (status, json) = send(&app, set_amount(1, 4)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "Requested quantity is out of stock");

    let (status, json) = send(&app, set_amount(1, 0)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "ignored");
    assert_eq!(json["cart"]["items"][0]["amount"], 3);
}

#[tokio::test]
async fn test_remove_item() {
    let (app, storage) = setup();
    send(&app, add(1)).await;
    send(&app, add(5)).await;

    let (status, json) = send(&app, remove("1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "removed");
    assert_eq!(json["cart"]["item_count"], 1);
    assert_eq!(json["cart"]["items"][0]["id"], 5);

    let persisted: Value =
        serde_json::from_str(&storage.get(CART_STORAGE_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(persisted.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_remove_missing_item_is_not_found() {
    let (app, storage) = setup();

    let (status, json) = send(&app, remove("9")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Failed to remove product");
    assert_eq!(storage.write_count(), 0);
}

#[tokio::test]
async fn test_invalid_product_id_is_bad_request() {
    let (app, _) = setup();

    let (status, json) = send(&app, remove("shoe")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("invalid product id"));
}

#[tokio::test]
async fn test_cart_is_restored_from_storage() {
    let storage = InMemoryStore::with_value(
        CART_STORAGE_KEY,
        r#"[{"id":1,"title":"Running Shoe","price":179.9,"image":"https://example.com/1.jpg","amount":2}]"#,
    );
    let app = setup_with(storage, catalog());

    let (status, json) = send(&app, get("/cart")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"][0]["title"], "Running Shoe");
    assert_eq!(json["items"][0]["amount"], 2);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _) = setup();
    send(&app, add(1)).await;

    let response = app.oneshot(get("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("cart_operations_total"));
}
