//! Shared fixtures for integration tests

use bookscout::config::{
    CacheConfig, CatalogConfig, Config, EmbeddingConfig, SearchConfig, ServerConfig,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a lexical-mode test configuration pointing at a mock catalog
pub fn test_config(root_url: &str) -> Config {
    Config {
        catalog: CatalogConfig {
            root_url: root_url.to_string(),
        },
        search: SearchConfig::default(),
        cache: CacheConfig::default(),
        embedding: EmbeddingConfig::default(),
        server: ServerConfig::default(),
    }
}

/// Renders a catalog root page with a navigation block
///
/// The first navigation entry is the "all items" link that category
/// discovery skips; the given categories follow it.
pub fn root_page(categories: &[(&str, &str)]) -> String {
    let mut links = String::new();
    for (name, href) in categories {
        links.push_str(&format!("<li><a href=\"{href}\">{name}</a></li>\n"));
    }
    format!(
        r#"<html><body>
        <ul class="nav nav-list">
            <li><a href="catalogue/category/books_1/index.html">Books</a></li>
            {links}
        </ul>
        </body></html>"#
    )
}

/// Renders one listing page of item containers, with an optional pager
pub fn listing_page(items: &[(&str, f64)], next_href: Option<&str>) -> String {
    let mut body = String::new();
    for (name, price) in items {
        let slug = name.replace(' ', "-");
        body.push_str(&format!(
            r#"<article class="product_pod">
                <div class="image_container">
                    <a href="{slug}.html"><img src="media/{slug}.jpg" alt="{name}" class="thumbnail"></a>
                </div>
                <p class="star-rating Three"></p>
                <div class="product_price">
                    <p class="price_color">£{price:.2}</p>
                    <p class="instock availability"><i class="icon-ok"></i> In stock </p>
                </div>
            </article>
            "#
        ));
    }
    let pager = match next_href {
        Some(href) => {
            format!(r#"<ul class="pager"><li class="next"><a href="{href}">next</a></li></ul>"#)
        }
        None => String::new(),
    };
    format!("<html><body>{body}{pager}</body></html>")
}

/// Mounts a GET route serving an HTML body
pub async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a GET route serving an HTML body, expecting exactly `hits` calls
pub async fn mount_page_expect(server: &MockServer, route: &str, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(hits)
        .mount(server)
        .await;
}
