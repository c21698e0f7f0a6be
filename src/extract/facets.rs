//! One function per field of [`ExtractionResult`](crate::results::ExtractionResult).
//!
//! Each facet reports failure as [`Ignored`]; the [`Extractor`](super::Extractor)
//! turns that into the field's empty value.

use std::collections::BTreeMap;
use url::Url;

use super::{DocumentTree, Ignored};
use crate::results::{Headings, Image, Link};
use crate::utils;

pub const MAX_LINKS: usize = 100;
pub const MAX_IMAGES: usize = 50;
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Subtrees left out of the main text
pub const NON_CONTENT_TAGS: [&str; 6] = ["script", "style", "nav", "footer", "header", "aside"];

/// Trimmed, non-empty `content` of the first element matching `selector`
fn meta_content<D: DocumentTree>(doc: &D, selector: &str) -> Result<Option<String>, Ignored> {
    let content = doc
        .select_all(selector)?
        .into_iter()
        .next()
        .and_then(|node| doc.attr(node, "content"))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    Ok(content)
}

pub fn title<D: DocumentTree>(doc: &D) -> Result<String, Ignored> {
    let from_tag = doc
        .select_all("title")?
        .into_iter()
        .next()
        .map(|node| doc.text(node).trim().to_string())
        .filter(|t| !t.is_empty());

    match from_tag {
        Some(title) => Ok(title),
        None => Ok(meta_content(doc, r#"meta[property="og:title"]"#)?.unwrap_or_default()),
    }
}

pub fn description<D: DocumentTree>(doc: &D) -> Result<String, Ignored> {
    if let Some(description) = meta_content(doc, r#"meta[name="description"]"#)? {
        return Ok(description);
    }
    Ok(meta_content(doc, r#"meta[property="og:description"]"#)?.unwrap_or_default())
}

/// Comma-separated `keywords` meta tag; source order, duplicates kept
pub fn keywords<D: DocumentTree>(doc: &D) -> Result<Vec<String>, Ignored> {
    let Some(raw) = meta_content(doc, r#"meta[name="keywords"]"#)? else {
        return Ok(Vec::new());
    };
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn headings<D: DocumentTree>(doc: &D) -> Result<Headings, Ignored> {
    let mut headings = Headings::default();
    for level in Headings::LEVELS {
        let texts: Vec<String> = doc
            .select_all(level)?
            .into_iter()
            .map(|node| doc.text(node).trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if let Some(bucket) = headings.level_mut(level) {
            *bucket = texts;
        }
    }
    Ok(headings)
}

/// Anchors resolved against `base`. Hrefs that cannot be resolved are skipped, and an
/// empty or whitespace-only href counts as absent rather than as a link to `base`.
pub fn links<D: DocumentTree>(doc: &D, base: &Url) -> Result<Vec<Link>, Ignored> {
    let mut links = Vec::new();
    for node in doc.select_all("a[href]")? {
        if links.len() >= MAX_LINKS {
            break;
        }
        let Some(href) = doc.attr(node, "href").filter(|h| !h.trim().is_empty()) else {
            continue;
        };
        let resolved = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                ::log::trace!("Skipping unresolvable href {:?}: {}", href, e);
                continue;
            }
        };
        let text = doc.text(node).trim().to_string();
        links.push(Link {
            text: if text.is_empty() { href.to_string() } else { text },
            href: resolved.to_string(),
        });
    }
    Ok(links)
}

/// Images resolved against `base`. Sources that cannot be resolved are skipped, and an
/// empty or whitespace-only src counts as absent.
pub fn images<D: DocumentTree>(doc: &D, base: &Url) -> Result<Vec<Image>, Ignored> {
    let mut images = Vec::new();
    for node in doc.select_all("img[src]")? {
        if images.len() >= MAX_IMAGES {
            break;
        }
        let Some(src) = doc.attr(node, "src").filter(|s| !s.trim().is_empty()) else {
            continue;
        };
        let resolved = match base.join(src) {
            Ok(url) => url,
            Err(e) => {
                ::log::trace!("Skipping unresolvable src {:?}: {}", src, e);
                continue;
            }
        };
        images.push(Image {
            alt: doc.attr(node, "alt").unwrap_or_default().to_string(),
            src: resolved.to_string(),
        });
    }
    Ok(images)
}

pub fn main_text<D: DocumentTree>(doc: &D) -> Result<String, Ignored> {
    let text = doc.visible_text(&NON_CONTENT_TAGS);
    Ok(utils::truncate_chars(&text, MAX_TEXT_CHARS))
}

/// Open Graph and Twitter Card tags keyed by their raw property/name, plus `author`
pub fn metadata<D: DocumentTree>(doc: &D) -> Result<BTreeMap<String, String>, Ignored> {
    let mut metadata = BTreeMap::new();

    let tagged = [
        (r#"meta[property^="og:"]"#, "property"),
        (r#"meta[name^="twitter:"]"#, "name"),
    ];
    for (selector, key_attr) in tagged {
        for node in doc.select_all(selector)? {
            let key = doc.attr(node, key_attr);
            let content = doc.attr(node, "content").map(str::trim).filter(|c| !c.is_empty());
            if let (Some(key), Some(content)) = (key, content) {
                metadata.insert(key.to_string(), content.to_string());
            }
        }
    }

    let author = match meta_content(doc, r#"meta[name="author"]"#)? {
        Some(author) => Some(author),
        None => meta_content(doc, r#"meta[property="article:author"]"#)?,
    };
    if let Some(author) = author {
        metadata.insert("author".to_string(), author);
    }

    Ok(metadata)
}

/// Parsed JSON-LD blocks; blocks that are not valid JSON are skipped
pub fn structured_data<D: DocumentTree>(doc: &D) -> Result<Vec<serde_json::Value>, Ignored> {
    let mut blocks = Vec::new();
    for node in doc.select_all(r#"script[type="application/ld+json"]"#)? {
        let raw = doc.text(node);
        match serde_json::from_str::<serde_json::Value>(raw.trim()) {
            Ok(value) => blocks.push(value),
            Err(e) => ::log::debug!("Skipping invalid JSON-LD block: {}", e),
        }
    }
    Ok(blocks)
}
