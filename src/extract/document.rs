use scraper::{ElementRef, Html, Selector};

use super::Ignored;
use crate::utils;

/// Read-only view of a parsed document.
///
/// Facet extractors only go through this trait, so they can run against any
/// tree that can answer CSS selectors.
pub trait DocumentTree {
    type Node<'a>: Copy
    where
        Self: 'a;

    /// All elements matching `selector`, in document order
    fn select_all(&self, selector: &str) -> Result<Vec<Self::Node<'_>>, Ignored>;

    /// Attribute value of an element
    fn attr<'a>(&'a self, node: Self::Node<'a>, name: &str) -> Option<&'a str>;

    /// Concatenated text of an element and its descendants
    fn text<'a>(&'a self, node: Self::Node<'a>) -> String;

    /// Whitespace-collapsed text of the document body with every subtree whose tag
    /// is listed in `excluded` left out. The document itself is not modified.
    fn visible_text(&self, excluded: &[&str]) -> String;
}

/// [`DocumentTree`] backed by `scraper`'s html5ever parser
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document. Never fails; broken markup is repaired the way
    /// browsers repair it.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }
}

impl DocumentTree for HtmlDocument {
    type Node<'a> = ElementRef<'a>;

    fn select_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, Ignored> {
        let parsed = Selector::parse(selector)
            .map_err(|e| Ignored::new(format!("invalid selector {:?}: {:?}", selector, e)))?;
        Ok(self.html.select(&parsed).collect())
    }

    fn attr<'a>(&'a self, node: ElementRef<'a>, name: &str) -> Option<&'a str> {
        node.value().attr(name)
    }

    fn text<'a>(&'a self, node: ElementRef<'a>) -> String {
        node.text().collect()
    }

    fn visible_text(&self, excluded: &[&str]) -> String {
        let mut working = self.html.clone();

        // Node ids are indices into the tree, so they stay valid in the clone.
        let excluded_ids: Vec<_> = match Selector::parse(&excluded.join(", ")) {
            Ok(selector) => self.html.select(&selector).map(|el| el.id()).collect(),
            Err(_) => Vec::new(),
        };
        for id in excluded_ids {
            if let Some(mut node) = working.tree.get_mut(id) {
                node.detach();
            }
        }

        let body = Selector::parse("body")
            .ok()
            .and_then(|selector| working.select(&selector).next());
        let raw: String = match body {
            Some(body) => body.text().collect(),
            None => working.root_element().text().collect(),
        };

        utils::collapse_whitespace(&raw)
    }
}
