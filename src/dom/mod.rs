//! Node-tree capability contract over parsed HTML
//!
//! Extraction code in this crate never touches a concrete parser type.
//! Instead it works against [`ElementNode`], a small capability trait
//! exposing exactly what record extraction needs:
//! - find the first element matching a CSS selector
//! - find all elements matching a CSS selector
//! - read an attribute value
//! - read the concatenated text content
//!
//! [`HtmlDocument`] and [`HtmlNode`] are the scraper-backed implementation
//! used in production; tests can substitute canned node trees.

use scraper::{ElementRef, Html, Selector};

/// Capability contract for one element in a parsed page.
///
/// Selectors are CSS strings; an invalid selector behaves like a selector
/// that matches nothing rather than panicking mid-crawl.
pub trait ElementNode: Sized {
    /// Returns the first descendant matching `selector`, if any.
    fn find_first(&self, selector: &str) -> Option<Self>;

    /// Returns all descendants matching `selector`, in document order.
    fn find_all(&self, selector: &str) -> Vec<Self>;

    /// Returns the value of the attribute `name` on this element.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Returns the concatenated text content of this element's subtree.
    fn text_content(&self) -> String;
}

/// An owned parsed HTML page.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses an HTML string into a document.
    ///
    /// Parsing is total: malformed markup yields a best-effort tree, never
    /// an error, matching browser behavior.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Returns the root element of the document.
    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode {
            element: self.html.root_element(),
        }
    }
}

/// A borrowed element within an [`HtmlDocument`].
#[derive(Clone, Copy)]
pub struct HtmlNode<'a> {
    element: ElementRef<'a>,
}

impl<'a> ElementNode for HtmlNode<'a> {
    fn find_first(&self, selector: &str) -> Option<Self> {
        let parsed = Selector::parse(selector).ok()?;
        self.element
            .select(&parsed)
            .next()
            .map(|element| HtmlNode { element })
    }

    fn find_all(&self, selector: &str) -> Vec<Self> {
        let Ok(parsed) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.element
            .select(&parsed)
            .map(|element| HtmlNode { element })
            .collect()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.value().attr(name).map(str::to_string)
    }

    fn text_content(&self) -> String {
        self.element.text().collect::<String>()
    }
}
