//! Integration tests for `ShopifyClient` against a local `wiremock` server.
//!
//! No real network traffic is made. Covers the happy paths (empty catalog,
//! single page, multi-page under both continuation strategies), the
//! pagination ceiling, and every error variant the fetches can propagate.

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storelink_core::PaginationStrategy;
use storelink_shopify::{ShopifyClient, ShopifyError};

const PRODUCTS_PATH: &str = "/admin/api/2023-10/products.json";
const CUSTOM_COLLECTIONS_PATH: &str = "/admin/api/2023-10/custom_collections.json";
const SMART_COLLECTIONS_PATH: &str = "/admin/api/2023-10/smart_collections.json";

/// Builds a client pointed at the mock server: 5-second timeout, test token.
fn test_client(server: &MockServer) -> ShopifyClient {
    ShopifyClient::new(&server.uri(), "shpat_test", "2023-10", 5)
        .expect("failed to build test ShopifyClient")
}

/// Minimal valid products page with the given product ids.
fn products_page(ids: &[i64]) -> serde_json::Value {
    let products: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Product {id}"),
                "handle": format!("product-{id}"),
                "body_html": null,
                "product_type": null,
                "images": [],
                "variants": [{
                    "id": id * 100,
                    "title": "Default Title",
                    "sku": null,
                    "price": "12.99",
                    "compare_at_price": null,
                    "position": 1
                }]
            })
        })
        .collect();
    json!({ "products": products })
}

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_products_returns_empty_vec_for_empty_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"products": []})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .fetch_all_products(250, PaginationStrategy::LinkCursor, 200)
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_all_products_returns_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_page(&[1])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client
        .fetch_all_products(250, PaginationStrategy::LinkCursor, 200)
        .await
        .expect("fetch");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[0].variants[0].price, "12.99");
}

#[tokio::test]
async fn fetch_all_products_follows_link_cursor_across_pages_in_order() {
    let server = MockServer::start().await;

    let next_link = format!(
        "<{base}{PRODUCTS_PATH}?limit=250&page_info=cursor2>; rel=\"next\"",
        base = server.uri()
    );

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param_is_missing("page_info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&products_page(&[1, 2]))
                .insert_header("Link", next_link.as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page_info", "cursor2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_page(&[3])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client
        .fetch_all_products(250, PaginationStrategy::LinkCursor, 200)
        .await
        .expect("fetch");

    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3], "pages must concatenate in fetch order");
}

#[tokio::test]
async fn fetch_all_products_short_page_strategy_stops_on_short_page() {
    let server = MockServer::start().await;

    // Page 1 returns exactly `limit` items, page 2 returns fewer.
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_page(&[1, 2])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_page(&[3])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client
        .fetch_all_products(2, PaginationStrategy::ShortPage, 200)
        .await
        .expect("fetch");

    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn fetch_all_products_stops_at_page_ceiling_and_keeps_accumulated_items() {
    let server = MockServer::start().await;

    // Every response signals another page; only the ceiling stops the loop.
    let next_link = format!(
        "<{base}{PRODUCTS_PATH}?limit=250&page_info=forever>; rel=\"next\"",
        base = server.uri()
    );

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&products_page(&[7]))
                .insert_header("Link", next_link.as_str()),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client
        .fetch_all_products(250, PaginationStrategy::LinkCursor, 3)
        .await
        .expect("ceiling stop must not be an error");

    assert_eq!(products.len(), 3, "one item per fetched page, 3 pages");
}

// ---------------------------------------------------------------------------
// Error propagation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_products_propagates_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .fetch_all_products(250, PaginationStrategy::LinkCursor, 200)
        .await;

    match result.unwrap_err() {
        ShopifyError::UnexpectedStatus { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream down", "raw body text must be preserved");
        }
        other => panic!("expected ShopifyError::UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_all_products_second_page_failure_discards_first_page() {
    let server = MockServer::start().await;

    let next_link = format!(
        "<{base}{PRODUCTS_PATH}?limit=250&page_info=cursor_fail>; rel=\"next\"",
        base = server.uri()
    );

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param_is_missing("page_info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&products_page(&[1]))
                .insert_header("Link", next_link.as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page_info", "cursor_fail"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .fetch_all_products(250, PaginationStrategy::LinkCursor, 200)
        .await;

    assert!(
        matches!(result, Err(ShopifyError::UnexpectedStatus { status: 500, .. })),
        "a mid-pagination failure must fail the whole fetch, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_all_products_propagates_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .fetch_all_products(250, PaginationStrategy::LinkCursor, 200)
        .await;

    assert!(
        matches!(result, Err(ShopifyError::Deserialize { .. })),
        "expected ShopifyError::Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_all_products_rejects_body_without_products_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"items": []})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .fetch_all_products(250, PaginationStrategy::LinkCursor, 200)
        .await;

    assert!(
        matches!(result, Err(ShopifyError::Deserialize { .. })),
        "a 2xx body without the items field is a format error, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_custom_collections_returns_collections_with_members() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CUSTOM_COLLECTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "custom_collections": [{
                "id": 10,
                "title": "Featured Lighting",
                "handle": "featured-lighting",
                "products": [{"id": 1}, {"id": 2}]
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let collections = client.fetch_custom_collections().await.expect("fetch");

    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].title, "Featured Lighting");
    assert_eq!(collections[0].products.len(), 2);
}

#[tokio::test]
async fn fetch_smart_collections_propagates_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SMART_COLLECTIONS_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_smart_collections().await;

    assert!(
        matches!(result, Err(ShopifyError::UnexpectedStatus { status: 401, .. })),
        "expected UnexpectedStatus(401), got: {result:?}"
    );
}

#[tokio::test]
async fn requests_carry_the_access_token_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(wiremock::matchers::header(
            "X-Shopify-Access-Token",
            "shpat_test",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_page(&[1])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client
        .fetch_all_products(250, PaginationStrategy::LinkCursor, 200)
        .await
        .expect("fetch");
    assert_eq!(products.len(), 1);
}
