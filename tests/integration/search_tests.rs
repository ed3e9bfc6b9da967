//! End-to-end search tests over a mock catalog
//!
//! These tests exercise the full engine cycle: root fetch, category
//! discovery, parallel category crawling, matching, caching, and
//! ranking.

use crate::common::{listing_page, mount_page, mount_page_expect, root_page, test_config};
use bookscout::matcher::MatchScore;
use bookscout::{ScoutError, SearchEngine, SearchMode};
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRAVEL_PATH: &str = "/catalogue/category/books/travel_2/index.html";
const TRAVEL_HREF: &str = "catalogue/category/books/travel_2/index.html";

#[tokio::test]
async fn test_lexical_search_end_to_end() {
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

    let matches = engine
        .search("alice", true, true)
        .await
        .expect("Search failed");

    assert_eq!(matches.len(), 1);
    let hit = &matches[0];
    assert_eq!(hit.record.name, "alice adventures");
    assert_eq!(hit.record.price, 51.77);
    assert_eq!(hit.record.availability, Some(true));
    assert_eq!(hit.record.rating, Some(3));
    assert_eq!(hit.score, MatchScore::Tokens(vec!["alice".to_string()]));
    assert!(hit.record.url.ends_with("alice-adventures.html"));
}

#[tokio::test]
async fn test_query_is_trimmed_and_lowercased() {
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
        listing_page(&[("alice adventures", 51.77)], None),
    )
    .await;

    let config = test_config(&format!("{}/index.html", mock_server.uri()));
    let engine = SearchEngine::new(config).expect("Failed to build engine");

    let matches = engine
        .search("  ALICE  ", false, false)
        .await
        .expect("Search failed");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].record.name, "alice adventures");
}

#[tokio::test]
async fn test_pagination_walks_every_listing_page() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/index.html",
        root_page(&[("Travel", TRAVEL_HREF)]),
    )
    .await;

    // Three listing pages of twenty items each, chained by "next" links
    let page_items = |page: usize| -> Vec<(String, f64)> {
        (0..20)
            .map(|i| (format!("travel book p{page} i{i:02}"), 10.0 + i as f64))
            .collect()
    };

    for (page, route, next) in [
        (1, TRAVEL_PATH, Some("page-2.html")),
        (
            2,
            "/catalogue/category/books/travel_2/page-2.html",
            Some("page-3.html"),
        ),
        (3, "/catalogue/category/books/travel_2/page-3.html", None),
    ] {
        let items = page_items(page);
        let refs: Vec<(&str, f64)> = items.iter().map(|(n, p)| (n.as_str(), *p)).collect();
        mount_page_expect(&mock_server, route, listing_page(&refs, next), 1).await;
    }

    let mut config = test_config(&format!("{}/index.html", mock_server.uri()));
    config.search.top_k = 100;
    let engine = SearchEngine::new(config).expect("Failed to build engine");

    let matches = engine
        .search("book", false, true)
        .await
        .expect("Search failed");

    // All sixty items match, in page order
    assert_eq!(matches.len(), 60);
    assert_eq!(matches[0].record.name, "travel book p1 i00");
    assert_eq!(matches[59].record.name, "travel book p3 i19");
}

#[tokio::test]
async fn test_first_page_only_skips_pagination() {
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

    // The second page must never be requested
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

    let matches = engine
        .search("book", false, false)
        .await
        .expect("Search failed");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].record.name, "travel book one");
}

#[tokio::test]
async fn test_oversized_match_list_is_cut_to_top_k() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/index.html",
        root_page(&[("Travel", TRAVEL_HREF)]),
    )
    .await;

    let items: Vec<(String, f64)> = (1..=15)
        .map(|i| (format!("book {i:02}"), 5.0 + i as f64))
        .collect();
    let refs: Vec<(&str, f64)> = items.iter().map(|(n, p)| (n.as_str(), *p)).collect();
    mount_page(&mock_server, TRAVEL_PATH, listing_page(&refs, None)).await;

    let config = test_config(&format!("{}/index.html", mock_server.uri()));
    let engine = SearchEngine::new(config).expect("Failed to build engine");

    let matches = engine
        .search("book", false, true)
        .await
        .expect("Search failed");

    // Fifteen lexical matches tie on rank, so the first ten by page
    // order survive the cut
    assert_eq!(matches.len(), 10);
    assert_eq!(matches[0].record.name, "book 01");
    assert_eq!(matches[9].record.name, "book 10");
}

#[tokio::test]
async fn test_fresh_snapshot_is_served_without_recrawl() {
    let mock_server = MockServer::start().await;

    mount_page_expect(
        &mock_server,
        "/index.html",
        root_page(&[("Travel", TRAVEL_HREF)]),
        1,
    )
    .await;
    mount_page_expect(
        &mock_server,
        TRAVEL_PATH,
        listing_page(&[("alice adventures", 51.77), ("dragon tales", 20.00)], None),
        1,
    )
    .await;

    let config = test_config(&format!("{}/index.html", mock_server.uri()));
    let engine = SearchEngine::new(config).expect("Failed to build engine");

    let first = engine
        .search("alice", false, true)
        .await
        .expect("First search failed");
    assert_eq!(first.len(), 1);

    // A different query against the same snapshot; expectations on the
    // mocks prove nothing was refetched
    let second = engine
        .search("dragon", false, true)
        .await
        .expect("Second search failed");
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].record.name, "dragon tales");
}

#[tokio::test]
async fn test_expired_snapshot_triggers_recrawl() {
    let mock_server = MockServer::start().await;

    mount_page_expect(
        &mock_server,
        "/index.html",
        root_page(&[("Travel", TRAVEL_HREF)]),
        2,
    )
    .await;
    mount_page_expect(
        &mock_server,
        TRAVEL_PATH,
        listing_page(&[("alice adventures", 51.77)], None),
        2,
    )
    .await;

    let mut config = test_config(&format!("{}/index.html", mock_server.uri()));
    config.cache.ttl_seconds = 1;
    let engine = SearchEngine::new(config).expect("Failed to build engine");

    engine
        .search("alice", false, true)
        .await
        .expect("First search failed");

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let matches = engine
        .search("alice", false, true)
        .await
        .expect("Second search failed");
    assert_eq!(matches.len(), 1);
}

#[tokio::test]
async fn test_failed_category_is_skipped() {
    let mock_server = MockServer::start().await;

    let mystery_href = "catalogue/category/books/mystery_3/index.html";
    mount_page(
        &mock_server,
        "/index.html",
        root_page(&[("Mystery", mystery_href), ("Travel", TRAVEL_HREF)]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/catalogue/category/books/mystery_3/index.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        TRAVEL_PATH,
        listing_page(&[("travel book", 10.0)], None),
    )
    .await;

    let config = test_config(&format!("{}/index.html", mock_server.uri()));
    let engine = SearchEngine::new(config).expect("Failed to build engine");

    let matches = engine
        .search("book", false, true)
        .await
        .expect("Search should survive one failed category");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].record.name, "travel book");
}

#[tokio::test]
async fn test_missing_navigation_is_fatal() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/index.html",
        "<html><body><p>maintenance page</p></body></html>".to_string(),
    )
    .await;

    let config = test_config(&format!("{}/index.html", mock_server.uri()));
    let engine = SearchEngine::new(config).expect("Failed to build engine");

    let result = engine.search("alice", false, true).await;
    assert!(matches!(result, Err(ScoutError::Discovery(_))));
}

#[tokio::test]
async fn test_malformed_item_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/index.html",
        root_page(&[("Travel", TRAVEL_HREF)]),
    )
    .await;

    // One intact item and one article with nothing extractable
    let listing = format!(
        "{}<article class=\"product_pod\"><p>coming soon</p></article></body></html>",
        listing_page(&[("alice adventures", 51.77)], None).trim_end_matches("</body></html>")
    );
    mount_page(&mock_server, TRAVEL_PATH, listing).await;

    let config = test_config(&format!("{}/index.html", mock_server.uri()));
    let engine = SearchEngine::new(config).expect("Failed to build engine");

    let matches = engine
        .search("alice", false, true)
        .await
        .expect("Search failed");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].record.name, "alice adventures");
}

#[tokio::test]
async fn test_embedding_search_end_to_end() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/index.html",
        root_page(&[("Fantasy", TRAVEL_HREF)]),
    )
    .await;
    mount_page(
        &mock_server,
        TRAVEL_PATH,
        listing_page(&[("dragon tales", 10.0), ("wizard school", 12.0)], None),
    )
    .await;

    let model_json = r#"{"dimension": 2, "vectors": {"dragon": [1.0, 0.0], "wizard": [0.0, 1.0]}}"#;
    let mut model = tempfile::NamedTempFile::new().expect("Failed to create model file");
    model
        .write_all(model_json.as_bytes())
        .expect("Failed to write model");
    model.flush().expect("Failed to flush model");

    let mut config = test_config(&format!("{}/index.html", mock_server.uri()));
    config.search.mode = SearchMode::Embedding;
    config.embedding.model_path = Some(model.path().display().to_string());
    let engine = SearchEngine::new(config).expect("Failed to build engine");

    let matches = engine
        .search("dragon", false, true)
        .await
        .expect("Search failed");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].record.name, "dragon tales");
    match matches[0].score {
        MatchScore::Similarity(similarity) => assert!(similarity > 0.8),
        ref other => panic!("expected similarity score, got {other:?}"),
    }
}

#[tokio::test]
async fn test_hybrid_mode_falls_back_to_lexical() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/index.html",
        root_page(&[("Travel", TRAVEL_HREF)]),
    )
    .await;
    mount_page_expect(
        &mock_server,
        TRAVEL_PATH,
        listing_page(&[("alice adventures", 51.77), ("bob builder", 12.34)], None),
        1,
    )
    .await;

    let model_json = r#"{"dimension": 2, "vectors": {"dragon": [1.0, 0.0]}}"#;
    let mut model = tempfile::NamedTempFile::new().expect("Failed to create model file");
    model
        .write_all(model_json.as_bytes())
        .expect("Failed to write model");
    model.flush().expect("Failed to flush model");

    let mut config = test_config(&format!("{}/index.html", mock_server.uri()));
    config.search.mode = SearchMode::Hybrid;
    config.embedding.model_path = Some(model.path().display().to_string());
    let engine = SearchEngine::new(config).expect("Failed to build engine");

    // "alice" has no embedding, so the vector pass matches nothing and
    // the lexical fallback rescans the snapshot without refetching
    let matches = engine
        .search("alice", false, true)
        .await
        .expect("Search failed");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].record.name, "alice adventures");
    assert_eq!(
        matches[0].score,
        MatchScore::Tokens(vec!["alice".to_string()])
    );
}
