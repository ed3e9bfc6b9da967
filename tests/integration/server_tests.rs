//! HTTP API tests over a live router and a mock catalog

use crate::common::{listing_page, mount_page, root_page, test_config};
use bookscout::server::router;
use bookscout::SearchEngine;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRAVEL_PATH: &str = "/catalogue/category/books/travel_2/index.html";
const TRAVEL_HREF: &str = "catalogue/category/books/travel_2/index.html";

/// Serves the API on an ephemeral port, returning its base URL
async fn spawn_api(engine: SearchEngine) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    let app = router(Arc::new(engine));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("API task failed");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_search_endpoint_returns_matches() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/index.html",
        root_page(&[("Travel", TRAVEL_HREF)]),
    )
    .await;
    mount_page(
        &mock_server,
        TRAVEL_PATH,
        listing_page(&[("alice adventures", 51.77), ("bob builder", 12.34)], None),
    )
    .await;

    let config = test_config(&format!("{}/index.html", mock_server.uri()));
    let engine = SearchEngine::new(config).expect("Failed to build engine");
    let base = spawn_api(engine).await;

    let response = reqwest::get(format!("{base}/search/alice"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["query"], "alice");
    assert_eq!(body["count"], 1);

    let hit = &body["matches"]["alice adventures"];
    assert_eq!(hit["score"], serde_json::json!(["alice"]));
    assert_eq!(hit["price"], 51.77);
    assert_eq!(hit["availability"], true);
    assert_eq!(hit["rating"], 3);
    assert!(hit["url"]
        .as_str()
        .expect("url should be a string")
        .ends_with("alice-adventures.html"));
}

#[tokio::test]
async fn test_search_endpoint_honors_query_flags() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/index.html",
        root_page(&[("Travel", TRAVEL_HREF)]),
    )
    .await;
    mount_page(
        &mock_server,
        TRAVEL_PATH,
        listing_page(&[("travel book one", 10.0)], Some("page-2.html")),
    )
    .await;

    // With all-pages=false the pager link must not be followed
    Mock::given(method("GET"))
        .and(path("/catalogue/category/books/travel_2/page-2.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&[("travel book two", 11.0)], None)),
        )
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = test_config(&format!("{}/index.html", mock_server.uri()));
    let engine = SearchEngine::new(config).expect("Failed to build engine");
    let base = spawn_api(engine).await;

    let body: serde_json::Value =
        reqwest::get(format!("{base}/search/book?all-pages=false&extended=false"))
            .await
            .expect("Request failed")
            .json()
            .await
            .expect("Invalid JSON");

    assert_eq!(body["count"], 1);
    let hit = &body["matches"]["travel book one"];
    assert_eq!(hit["price"], 10.0);
    // extended=false drops the optional fields entirely
    assert!(hit.get("availability").is_none());
    assert!(hit.get("rating").is_none());
}

#[tokio::test]
async fn test_upstream_failure_maps_to_bad_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = test_config(&format!("{}/index.html", mock_server.uri()));
    let engine = SearchEngine::new(config).expect("Failed to build engine");
    let base = spawn_api(engine).await;

    let response = reqwest::get(format!("{base}/search/alice"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);

    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["error"]["type"], "upstream_error");
    assert!(!body["error"]["message"]
        .as_str()
        .expect("message should be a string")
        .is_empty());
}

#[tokio::test]
async fn test_index_and_help_pages() {
    let mock_server = MockServer::start().await;

    let config = test_config(&format!("{}/index.html", mock_server.uri()));
    let engine = SearchEngine::new(config).expect("Failed to build engine");
    let base = spawn_api(engine).await;

    let index = reqwest::get(&base)
        .await
        .expect("Request failed")
        .text()
        .await
        .expect("Invalid body");
    assert!(index.contains("bookscout"));

    let help = reqwest::get(format!("{base}/help"))
        .await
        .expect("Request failed")
        .text()
        .await
        .expect("Invalid body");
    assert!(help.contains("all-pages"));
    assert!(help.contains("extended"));
}
