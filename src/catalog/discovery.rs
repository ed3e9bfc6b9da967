//! Category discovery from the catalog's navigation block

use crate::catalog::DiscoveryError;
use crate::dom::ElementNode;
use std::collections::BTreeMap;

/// Lower-cased category name -> relative entry URL, in name order
///
/// The ordered map gives every crawl cycle a deterministic category
/// sequence, which the ranker's tie stability depends on.
pub type CategoryMap = BTreeMap<String, String>;

/// CSS selector for the catalog's side navigation block.
const NAV_SELECTOR: &str = "ul.nav.nav-list";

/// Extracts the category map from the catalog's root page
///
/// Every navigation link except the first is a category; the first entry
/// is the "all items" link and is skipped. Keys are trimmed, lower-cased
/// link texts; values keep the raw relative href for the caller to resolve.
///
/// # Arguments
///
/// * `root` - Root element of the parsed catalog root page
///
/// # Returns
///
/// * `Ok(CategoryMap)` - Category names mapped to relative entry URLs
/// * `Err(DiscoveryError)` - The navigation block is absent
pub fn discover_categories<N: ElementNode>(root: &N) -> Result<CategoryMap, DiscoveryError> {
    let nav = root
        .find_first(NAV_SELECTOR)
        .ok_or(DiscoveryError::NavigationMissing)?;

    let mut categories = CategoryMap::new();
    for link in nav.find_all("a[href]").into_iter().skip(1) {
        let Some(href) = link.attribute("href") else {
            continue;
        };
        let name = link.text_content().trim().to_lowercase();
        if name.is_empty() {
            continue;
        }
        categories.insert(name, href);
    }

    tracing::debug!("Discovered {} categories", categories.len());
    Ok(categories)
}
