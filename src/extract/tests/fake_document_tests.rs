//! Facets driven through a hand-built tree instead of the HTML parser.

use std::collections::HashMap;

use crate::extract::{DocumentTree, Extractor, Ignored, facets};
use crate::normalize::normalize;

#[derive(Debug, Default)]
struct FakeElement {
    attrs: HashMap<&'static str, &'static str>,
    text: &'static str,
}

/// Answers selectors from a fixed table; unknown selectors match nothing
#[derive(Default)]
struct FakeDocument {
    answers: HashMap<&'static str, Vec<FakeElement>>,
    body: &'static str,
    broken: bool,
}

impl FakeDocument {
    fn with(mut self, selector: &'static str, element: FakeElement) -> Self {
        self.answers.entry(selector).or_default().push(element);
        self
    }
}

fn element(attrs: &[(&'static str, &'static str)], text: &'static str) -> FakeElement {
    FakeElement {
        attrs: attrs.iter().copied().collect(),
        text,
    }
}

impl DocumentTree for FakeDocument {
    type Node<'a> = &'a FakeElement;

    fn select_all(&self, selector: &str) -> Result<Vec<&FakeElement>, Ignored> {
        if self.broken {
            return Err(Ignored::new("tree unavailable"));
        }
        Ok(self
            .answers
            .get(selector)
            .map(|found| found.iter().collect())
            .unwrap_or_default())
    }

    fn attr<'a>(&'a self, node: &'a FakeElement, name: &str) -> Option<&'a str> {
        node.attrs.get(name).copied()
    }

    fn text<'a>(&'a self, node: &'a FakeElement) -> String {
        node.text.to_string()
    }

    fn visible_text(&self, _excluded: &[&str]) -> String {
        self.body.to_string()
    }
}

#[test]
fn test_title_falls_back_to_open_graph() {
    let doc = FakeDocument::default()
        .with("title", element(&[], "   "))
        .with(
            r#"meta[property="og:title"]"#,
            element(&[("content", "OG Title")], ""),
        );
    assert_eq!(facets::title(&doc).unwrap(), "OG Title");
}

#[test]
fn test_links_resolved_through_the_trait() {
    let doc = FakeDocument::default()
        .with("a[href]", element(&[("href", "/docs")], "Docs"))
        .with("a[href]", element(&[("href", "http://[bad")], "Broken"))
        .with("a[href]", element(&[("href", "page.html")], ""));
    let base = url::Url::parse("https://example.com/dir/").unwrap();

    let links = facets::links(&doc, &base).unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].href, "https://example.com/docs");
    assert_eq!(links[0].text, "Docs");
    assert_eq!(links[1].href, "https://example.com/dir/page.html");
    assert_eq!(links[1].text, "page.html");
}

#[test]
fn test_failing_tree_degrades_every_facet() {
    let doc = FakeDocument {
        broken: true,
        body: "still visible",
        ..FakeDocument::default()
    };
    let url = normalize("example.com").unwrap();
    let result = Extractor::extract_document(&doc, &url, chrono::Utc::now());

    assert_eq!(result.url, "https://example.com");
    assert_eq!(result.title, "");
    assert!(result.keywords.is_empty());
    assert!(result.headings.is_empty());
    assert!(result.links.is_empty());
    assert!(result.metadata.is_empty());
    // Main text does not depend on selectors
    assert_eq!(result.text, "still visible");
}
