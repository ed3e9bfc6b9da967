//! Integration test harness
//!
//! Tests run the full search stack against wiremock catalog servers:
//! crawling, matching, caching, ranking, and the HTTP API.

mod common;
mod search_tests;
mod server_tests;
