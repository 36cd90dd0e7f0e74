//! Integration tests for `ShopifyClient` against a local `wiremock`
//! server — no real network traffic. Covers the happy paths (empty,
//! single page, multi-page, collections) and the error taxonomy the
//! pipeline relies on.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scex_scraper::{ScraperError, ShopifyClient};

/// 5-second timeout, descriptive UA, no retries.
fn test_client() -> ShopifyClient {
    ShopifyClient::new(5, "scex-test/0.1", 0, 0).expect("failed to build test ShopifyClient")
}

fn test_client_with_retries(max_retries: u32) -> ShopifyClient {
    ShopifyClient::new(5, "scex-test/0.1", max_retries, 0)
        .expect("failed to build test ShopifyClient")
}

/// A minimal valid product with one variant and one image.
fn product_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "handle": format!("product-{id}"),
        "body_html": "<p>desc</p>",
        "vendor": "Acme",
        "product_type": "Shirts",
        "tags": ["tag"],
        "published_at": "2024-01-01T00:00:00Z",
        "created_at": "2023-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "variants": [{
            "id": id * 10,
            "title": "Default Title",
            "option1": "Default Title",
            "price": "12.99",
            "available": true
        }],
        "images": [{"id": id * 100, "src": format!("https://cdn/{id}.jpg"), "position": 1}]
    })
}

fn products_body(ids: &[i64]) -> serde_json::Value {
    json!({ "products": ids.iter().map(|id| product_json(*id)).collect::<Vec<_>>() })
}

// ---------------------------------------------------------------------------
// fetch_standard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_standard_returns_converted_raw_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[1])))
        .mount(&server)
        .await;

    let client = test_client();
    let products = client
        .fetch_standard(&server.uri(), 250)
        .await
        .expect("expected Ok");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].identity(), "1");
    assert_eq!(products[0].vendor, "Acme");
    assert_eq!(products[0].variants.len(), 1);
    assert_eq!(products[0].images.len(), 1);
}

// ---------------------------------------------------------------------------
// fetch_paginated
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_paginated_empty_store_returns_empty_vec() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"products": []})))
        .mount(&server)
        .await;

    let client = test_client();
    let result = client.fetch_paginated(&server.uri(), 250, 50, 0).await;
    assert!(result.expect("expected Ok").is_empty());
}

#[tokio::test]
async fn fetch_paginated_stops_after_short_page() {
    let server = MockServer::start().await;

    // Page 1 returns exactly page_size products, page 2 returns fewer.
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[1, 2])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[3])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client();
    let products = client
        .fetch_paginated(&server.uri(), 2, 50, 0)
        .await
        .expect("expected Ok");
    assert_eq!(products.len(), 3);
    assert_eq!(products[0].identity(), "1");
    assert_eq!(products[2].identity(), "3");
    // No page 3 request: the short page ended the walk (enforced by the
    // `.expect(1)` counts above at mock verification).
}

#[tokio::test]
async fn fetch_paginated_single_short_page_makes_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[1])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client();
    let products = client
        .fetch_paginated(&server.uri(), 250, 50, 0)
        .await
        .expect("expected Ok");
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn fetch_paginated_respects_page_cap() {
    let server = MockServer::start().await;

    // Every page returns exactly page_size products — an endless feed.
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[1, 2])))
        .mount(&server)
        .await;

    let client = test_client();
    let products = client
        .fetch_paginated(&server.uri(), 2, 3, 0)
        .await
        .expect("expected Ok despite hitting the cap");
    // 3 pages × 2 products, then the cap stops the walk.
    assert_eq!(products.len(), 6);
}

#[tokio::test]
async fn fetch_paginated_propagates_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client();
    let result = client.fetch_paginated(&server.uri(), 250, 50, 0).await;
    assert!(matches!(result, Err(ScraperError::NotFound { .. })));
}

#[tokio::test]
async fn fetch_paginated_propagates_rate_limit_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let client = test_client();
    let result = client.fetch_paginated(&server.uri(), 250, 50, 0).await;
    match result {
        Err(ScraperError::RateLimited {
            retry_after_secs, ..
        }) => assert_eq!(retry_after_secs, 30),
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_paginated_retries_429_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[42])))
        .mount(&server)
        .await;

    let client = test_client_with_retries(1);
    let products = client
        .fetch_paginated(&server.uri(), 250, 50, 0)
        .await
        .expect("expected Ok after retry");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].identity(), "42");
}

#[tokio::test]
async fn fetch_paginated_retries_503_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[7])))
        .mount(&server)
        .await;

    let client = test_client_with_retries(1);
    let products = client
        .fetch_paginated(&server.uri(), 250, 50, 0)
        .await
        .expect("expected Ok after retry");
    assert_eq!(products[0].identity(), "7");
}

#[tokio::test]
async fn fetch_paginated_exhausted_retries_return_final_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2) // 1 initial + 1 retry
        .mount(&server)
        .await;

    let client = test_client_with_retries(1);
    let result = client.fetch_paginated(&server.uri(), 250, 50, 0).await;
    assert!(matches!(result, Err(ScraperError::RateLimited { .. })));
}

#[tokio::test]
async fn fetch_paginated_propagates_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let client = test_client();
    let result = client.fetch_paginated(&server.uri(), 250, 50, 0).await;
    assert!(matches!(result, Err(ScraperError::Deserialize { .. })));
}

#[tokio::test]
async fn fetch_paginated_second_page_failure_discards_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[1, 2])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = test_client();
    let result = client.fetch_paginated(&server.uri(), 2, 50, 0).await;
    match result {
        Err(ScraperError::UnexpectedStatus { status, .. }) => assert_eq!(status, 403),
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// fetch_by_collections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_by_collections_tags_products_and_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "collections": [
                {"handle": "summer", "title": "Summer"},
                {"handle": "sale", "title": "Sale"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/summer/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[1, 2])))
        .mount(&server)
        .await;
    // Product 2 also appears in the sale collection.
    Mock::given(method("GET"))
        .and(path("/collections/sale/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[2, 3])))
        .mount(&server)
        .await;

    let client = test_client();
    let (products, counts) = client
        .fetch_by_collections(&server.uri(), 0)
        .await
        .expect("expected Ok");

    // Dedup keeps the first collection's copy of product 2.
    assert_eq!(products.len(), 3);
    assert_eq!(products[0].collection_name.as_deref(), Some("Summer"));
    assert_eq!(products[1].collection_name.as_deref(), Some("Summer"));
    assert_eq!(products[2].collection_name.as_deref(), Some("Sale"));

    // Counts reflect per-collection feed sizes, before dedup.
    assert_eq!(counts["Summer"], 2);
    assert_eq!(counts["Sale"], 2);
}

#[tokio::test]
async fn fetch_by_collections_skips_broken_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "collections": [
                {"handle": "broken", "title": "Broken"},
                {"handle": "good", "title": "Good"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/broken/products.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/good/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[9])))
        .mount(&server)
        .await;

    let client = test_client();
    let (products, counts) = client
        .fetch_by_collections(&server.uri(), 0)
        .await
        .expect("expected Ok despite one broken collection");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].identity(), "9");
    assert!(!counts.contains_key("Broken"));
}

#[tokio::test]
async fn fetch_by_collections_fails_when_collection_list_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client();
    let result = client.fetch_by_collections(&server.uri(), 0).await;
    assert!(matches!(result, Err(ScraperError::NotFound { .. })));
}
