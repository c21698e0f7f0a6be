pub mod document;
pub mod facets;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use std::fmt;

pub use document::{DocumentTree, HtmlDocument};

use crate::normalize::NormalizedUrl;
use crate::results::ExtractionResult;

/// Why a facet fell back to its empty value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ignored(String);

impl Ignored {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns an HTML document into an [`ExtractionResult`].
///
/// Extraction never fails: every facet is computed independently and a facet that
/// cannot be computed is left empty.
pub struct Extractor;

impl Extractor {
    /// Parse `html` and extract every facet, resolving links against `final_url`
    pub fn extract(html: &str, final_url: &NormalizedUrl) -> ExtractionResult {
        let document = HtmlDocument::parse(html);
        Self::extract_document(&document, final_url, Utc::now())
    }

    /// Extract every facet from an already parsed document
    pub fn extract_document<D: DocumentTree>(
        document: &D,
        final_url: &NormalizedUrl,
        scraped_at: DateTime<Utc>,
    ) -> ExtractionResult {
        let base = final_url
            .to_url()
            .map_err(|e| Ignored::new(format!("unusable base URL: {}", e)));

        let result = ExtractionResult {
            url: final_url.as_str().to_string(),
            title: or_default("title", facets::title(document)),
            description: or_default("description", facets::description(document)),
            keywords: or_default("keywords", facets::keywords(document)),
            headings: or_default("headings", facets::headings(document)),
            links: or_default(
                "links",
                base.clone().and_then(|base| facets::links(document, &base)),
            ),
            images: or_default(
                "images",
                base.and_then(|base| facets::images(document, &base)),
            ),
            text: or_default("text", facets::main_text(document)),
            metadata: or_default("metadata", facets::metadata(document)),
            structured_data: or_default("structuredData", facets::structured_data(document)),
            scraped_at,
        };

        ::log::debug!(
            "Extracted {}: {} links, {} images, {} JSON-LD blocks, {} text chars",
            final_url,
            result.links.len(),
            result.images.len(),
            result.structured_data.len(),
            crate::utils::char_len(&result.text)
        );

        result
    }
}

fn or_default<T: Default>(facet: &str, outcome: Result<T, Ignored>) -> T {
    outcome.unwrap_or_else(|ignored| {
        ::log::debug!("Facet {} left empty: {}", facet, ignored);
        T::default()
    })
}
