//! Lossy projection of an [`ExtractionResult`] into a bounded [`RefinedRecord`].
//!
//! Pure and deterministic: the same input always produces the same record.

use serde::Deserialize;
use serde_json::Value;

use crate::results::{
    ExtractionResult, Image, Link, MainHeadings, RefinedMetadata, RefinedRecord,
};
use crate::utils::truncate_chars;

pub const MAX_H1: usize = 5;
pub const MAX_H2: usize = 10;
pub const MAX_LINKS: usize = 20;
pub const MAX_LINK_TEXT_CHARS: usize = 100;
pub const MAX_IMAGES: usize = 5;
pub const MAX_IMAGE_ALT_CHARS: usize = 200;
pub const MAX_TEXT_PREVIEW_CHARS: usize = 2_000;

/// Refine an extraction.
///
/// Returns `None` when the extraction has no `url`, which callers should report as
/// a client error.
pub fn refine(extraction: &ExtractionResult) -> Option<RefinedRecord> {
    if extraction.url.trim().is_empty() {
        ::log::warn!("Refusing to refine an extraction without a url");
        return None;
    }

    let metadata = &extraction.metadata;
    let pick = |key: &str| metadata.get(key).cloned();

    Some(RefinedRecord {
        url: extraction.url.clone(),
        title: extraction.title.clone(),
        description: extraction.description.clone(),
        keywords: extraction.keywords.clone(),
        main_headings: MainHeadings {
            h1: first(&extraction.headings.h1, MAX_H1),
            h2: first(&extraction.headings.h2, MAX_H2),
        },
        important_links: extraction
            .links
            .iter()
            .take(MAX_LINKS)
            .map(|link| Link {
                text: truncate_chars(&link.text, MAX_LINK_TEXT_CHARS),
                href: link.href.clone(),
            })
            .collect(),
        image_count: extraction.images.len(),
        main_images: extraction
            .images
            .iter()
            .take(MAX_IMAGES)
            .map(|image| Image {
                alt: truncate_chars(&image.alt, MAX_IMAGE_ALT_CHARS),
                src: image.src.clone(),
            })
            .collect(),
        text_preview: truncate_chars(&extraction.text, MAX_TEXT_PREVIEW_CHARS),
        metadata: RefinedMetadata {
            author: pick("author"),
            og_title: pick("og:title"),
            og_description: pick("og:description"),
            og_image: pick("og:image"),
        },
        structured_data_count: extraction.structured_data.len(),
        scraped_at: extraction.scraped_at,
    })
}

fn first(items: &[String], n: usize) -> Vec<String> {
    items.iter().take(n).cloned().collect()
}

#[derive(Debug, Deserialize)]
struct SavePayload {
    url: Option<String>,
    data: Option<Value>,
}

/// Refine a save request body of the form `{"url": ..., "data": <extraction>}`.
///
/// Returns `None` when `url` is missing or blank, when `data` is missing or not an
/// object, or when `data` has fields of the wrong type. Fields absent from `data`
/// take their empty values. The record's `url` is the payload's `url`.
pub fn refine_payload(payload: &Value) -> Option<RefinedRecord> {
    let SavePayload { url, data } = match SavePayload::deserialize(payload) {
        Ok(parsed) => parsed,
        Err(e) => {
            ::log::warn!("Rejecting save payload: {}", e);
            return None;
        }
    };

    let url = url.filter(|u| !u.trim().is_empty())?;
    let data = data.filter(Value::is_object)?;

    let mut extraction: ExtractionResult = match serde_json::from_value(data) {
        Ok(extraction) => extraction,
        Err(e) => {
            ::log::warn!("Rejecting save payload for {}: {}", url, e);
            return None;
        }
    };
    extraction.url = url;

    refine(&extraction)
}
